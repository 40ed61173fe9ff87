//! Manual forecast adjustments.
//!
//! Users can nudge a single bucket's predicted traffic by a percentage.
//! Adjustments live for the session, keyed by store and bucket label, and
//! are cleared wholesale when the granularity changes because hour labels
//! and weekday labels are not comparable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::CoreError;
use crate::generator::ai_staffing;
use crate::models::series::{SeriesByStore, SeriesRow};

/// Slider range for a single adjustment, in percent.
pub const ADJUSTMENT_RANGE: std::ops::RangeInclusive<i32> = -50..=50;

/// Session-scoped percentage adjustments: store → bucket label → percent.
///
/// A zero percentage is never stored; setting an entry to zero removes it,
/// so "no adjustment" and "0% adjustment" are the same state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentMap {
    by_store: BTreeMap<String, BTreeMap<String, i32>>,
}

impl AdjustmentMap {
    pub fn new() -> AdjustmentMap {
        AdjustmentMap::default()
    }

    /// Set or clear one adjustment. A percentage of zero removes the entry.
    pub fn set(&mut self, store: &str, label: &str, percent: i32) -> Result<(), CoreError> {
        if !ADJUSTMENT_RANGE.contains(&percent) {
            return Err(CoreError::AdjustmentOutOfRange(percent));
        }
        if percent == 0 {
            if let Some(entries) = self.by_store.get_mut(store) {
                entries.remove(label);
                if entries.is_empty() {
                    self.by_store.remove(store);
                }
            }
        } else {
            self.by_store
                .entry(store.to_string())
                .or_default()
                .insert(label.to_string(), percent);
        }
        Ok(())
    }

    /// Current adjustment for a bucket, 0 when none is stored.
    pub fn get(&self, store: &str, label: &str) -> i32 {
        self.by_store
            .get(store)
            .and_then(|entries| entries.get(label))
            .copied()
            .unwrap_or(0)
    }

    /// Drop every adjustment for one store ("Reset All" in the UI).
    pub fn clear_store(&mut self, store: &str) {
        self.by_store.remove(store);
    }

    /// Drop everything. Runs on every granularity switch.
    pub fn clear(&mut self) {
        self.by_store.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.by_store.is_empty()
    }

    /// Number of active adjustments for one store.
    pub fn store_len(&self, store: &str) -> usize {
        self.by_store.get(store).map_or(0, BTreeMap::len)
    }

    fn store_entries(&self, store: &str) -> Option<&BTreeMap<String, i32>> {
        self.by_store.get(store)
    }
}

/// Apply adjustments to freshly generated series, non-destructively.
///
/// Each adjusted bucket gets `predicted := floor(predicted * (1 + pct/100))`
/// and its AI staffing recommendation recomputed from the new value.
/// Baseline staffing and observed traffic are never touched. An adjustment
/// whose label no longer exists (stale after a granularity switch) is a
/// logged no-op.
pub fn apply_adjustments(series_by_store: &SeriesByStore, adjustments: &AdjustmentMap) -> SeriesByStore {
    series_by_store
        .iter()
        .map(|(store, rows)| {
            let mut rows = rows.clone();
            if let Some(entries) = adjustments.store_entries(store) {
                for (label, percent) in entries {
                    match rows.iter_mut().find(|row| &row.label == label) {
                        Some(row) => apply_to_row(row, *percent),
                        None => warn!(
                            store = %store,
                            label = %label,
                            percent = *percent,
                            "stale adjustment label, skipping"
                        ),
                    }
                }
            }
            (store.clone(), rows)
        })
        .collect()
}

fn apply_to_row(row: &mut SeriesRow, percent: i32) {
    let adjusted = (row.predicted_traffic as f64 * (1.0 + f64::from(percent) / 100.0)) as i64;
    row.predicted_traffic = adjusted;
    row.ai_recommended_staffing = ai_staffing(adjusted);
}

/// Invert an adjustment to recover the original predicted value for
/// "original vs adjusted" display. Accurate to ±1 from integer rounding.
pub fn original_traffic(adjusted: i64, percent: i32) -> i64 {
    (adjusted as f64 / (1.0 + f64::from(percent) / 100.0)).round() as i64
}
