use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::history::{AdoptionSummary, CalendarDay};
use super::series::{AggregateTable, Granularity, SeriesByStore};

/// Headline KPI triple for the selected scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of predicted traffic over the scope.
    pub total_traffic: i64,
    /// Potential sales revenue in DKK:
    /// 20% conversion × 931.25 kr average ticket per visit.
    pub potential_revenue: i64,
    /// Realized vs forecast FTE ratio as a whole percentage.
    pub staffing_efficiency: i64,
}

/// Forecast accuracy for three display windows.
///
/// All three values derive from one base accuracy estimate with seeded
/// jitter per window — this is a display smoothing layer, not three
/// independent measurements. All zeros means "not applicable" (future
/// reference date) and must be rendered as N/A.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastAccuracy {
    pub today: f64,
    pub three_day: f64,
    pub week: f64,
}

impl ForecastAccuracy {
    pub const NOT_APPLICABLE: ForecastAccuracy = ForecastAccuracy {
        today: 0.0,
        three_day: 0.0,
        week: 0.0,
    };

    pub fn is_not_applicable(&self) -> bool {
        *self == Self::NOT_APPLICABLE
    }
}

/// Average-FTE comparison between the legacy plan and the AI plan,
/// with the estimated revenue impact of optimal staffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingComparison {
    /// Average legacy FTE per bucket over the view period.
    pub baseline_fte: f64,
    /// Average AI-recommended FTE per bucket over the view period.
    pub ai_fte: f64,
    /// `baseline_fte - ai_fte`; positive means the legacy plan overstaffs.
    pub fte_difference: f64,
    /// Revenue captured per day from a 5% conversion improvement.
    pub revenue_impact_per_day: i64,
    /// Weekly figure, present only in daily mode.
    pub revenue_impact_per_week: Option<i64>,
}

/// Adoption rate over three recent windows for the selected scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionTrend {
    /// 100 or 0 depending on today's recorded decision.
    pub today: f64,
    /// Share of FollowedAi days over the last 3 days.
    pub three_day: f64,
    /// Share of FollowedAi days over the last 7 days.
    pub week: f64,
}

/// Everything a presentation layer needs to render one dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub scope: String,
    pub reference_date: NaiveDate,
    pub granularity: Granularity,
    pub series_by_store: SeriesByStore,
    pub aggregate: AggregateTable,
    pub kpis: KpiSummary,
    pub accuracy: ForecastAccuracy,
    pub staffing: StaffingComparison,
    pub adoption_trend: AdoptionTrend,
    pub adoption_summary: Vec<AdoptionSummary>,
    /// 30-day decision calendar, present only for single-store scopes.
    pub calendar: Option<Vec<CalendarDay>>,
}

/// API request body for the /api/dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardRequest {
    /// "ALL" or a store name (default: "ALL").
    pub scope: Option<String>,
    /// Reference date (default: today).
    pub reference_date: Option<NaiveDate>,
    /// "hourly" or "daily" (default: "hourly").
    pub granularity: Option<String>,
    /// Percentage adjustments to apply before rendering:
    /// store name → bucket label → percent in [-50, 50].
    pub adjustments: Option<BTreeMap<String, BTreeMap<String, i32>>>,
    /// Optionally record today's decision for one store before rendering.
    pub decision: Option<DecisionAction>,
}

/// A "record today's decision" action carried on a dashboard request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionAction {
    pub store: String,
    pub followed_ai: bool,
}
