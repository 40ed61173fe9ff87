use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time bucketing of a series: 12 hour-of-day buckets or 7 day-of-week buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    Hourly,
    Daily,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Hourly => write!(f, "hourly"),
            Granularity::Daily => write!(f, "daily"),
        }
    }
}

/// Observed traffic for a bucket.
///
/// A bucket that has not yet elapsed carries no measurement at all, which
/// is distinct from a measured zero — callers must handle both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Actual {
    /// The bucket's wall-clock time has not passed yet.
    Pending,
    /// Measured traffic for an elapsed bucket.
    Realized(i64),
}

impl Actual {
    pub fn realized(&self) -> Option<i64> {
        match self {
            Actual::Realized(v) => Some(*v),
            Actual::Pending => None,
        }
    }
}

/// One time bucket of a store's forecast series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesRow {
    /// Bucket label: "09:00".."20:00" in hourly mode, "Monday".."Sunday" in daily.
    pub label: String,
    /// Forecast customer visits for this bucket.
    pub predicted_traffic: i64,
    /// Observed visits, present only for elapsed buckets.
    pub actual_traffic: Actual,
    /// Legacy flat staffing level (constant across buckets).
    pub baseline_staffing: i64,
    /// AI staffing recommendation, always `floor(0.93 * predicted_traffic)`.
    pub ai_recommended_staffing: i64,
}

/// Per-store forecast series, keyed by store name.
///
/// A `BTreeMap` keeps store iteration order stable across renders.
pub type SeriesByStore = BTreeMap<String, Vec<SeriesRow>>;

/// One row of the cross-store aggregate view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateRow {
    pub label: String,
    /// Each store's predicted traffic for this bucket.
    pub per_store: BTreeMap<String, i64>,
    /// Sum of predicted traffic across the fleet.
    pub total_traffic: i64,
}

/// Cross-store table: one row per bucket label, derived on every render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateTable {
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// Sum of `total_traffic` over all buckets.
    pub fn total_traffic(&self) -> i64 {
        self.rows.iter().map(|r| r.total_traffic).sum()
    }
}
