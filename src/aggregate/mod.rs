//! Cross-store aggregation.
//!
//! Builds the fleet-wide table: one row per bucket label, one predicted
//! traffic column per store, plus a total column. The table is derived on
//! every render and never persisted independently of its source series.

use crate::error::CoreError;
use crate::models::series::{AggregateRow, AggregateTable, SeriesByStore};
use crate::models::store::ALL_STORES;

/// Build the aggregate table over the fixed store fleet.
///
/// All stores share one ordered label axis by construction; a missing
/// store series or a mismatched label set is an error rather than a
/// silently partial table.
pub fn aggregate(series_by_store: &SeriesByStore) -> Result<AggregateTable, CoreError> {
    let axis_store = ALL_STORES[0];
    let axis = series_by_store
        .get(axis_store)
        .ok_or_else(|| CoreError::MissingStoreSeries(axis_store.to_string()))?;

    let mut rows: Vec<AggregateRow> = axis
        .iter()
        .map(|row| AggregateRow {
            label: row.label.clone(),
            per_store: Default::default(),
            total_traffic: 0,
        })
        .collect();

    for store in ALL_STORES {
        let series = series_by_store
            .get(store)
            .ok_or_else(|| CoreError::MissingStoreSeries(store.to_string()))?;
        if series.len() != rows.len() {
            return Err(CoreError::MismatchedBucketLabels(store.to_string()));
        }
        for (slot, row) in rows.iter_mut().zip(series.iter()) {
            if slot.label != row.label {
                return Err(CoreError::MismatchedBucketLabels(store.to_string()));
            }
            slot.per_store.insert(store.to_string(), row.predicted_traffic);
            slot.total_traffic += row.predicted_traffic;
        }
    }

    Ok(AggregateTable { rows })
}
