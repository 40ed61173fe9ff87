//! Error taxonomy for the dashboard core.
//!
//! The taxonomy is deliberately narrow: most degenerate inputs degrade to
//! documented defaults (see the KPI and accuracy functions) instead of
//! failing, because every input is internally constructed demo data.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Adjustment percentages follow the UI slider's [-50, 50] range.
    #[error("adjustment of {0}% is outside the allowed -50%..=50% range")]
    AdjustmentOutOfRange(i32),

    /// The aggregate view requires a series for every store in the fleet.
    #[error("no series generated for store '{0}'")]
    MissingStoreSeries(String),

    /// All stores must share one ordered set of bucket labels.
    #[error("bucket labels for store '{0}' do not match the aggregate axis")]
    MismatchedBucketLabels(String),
}
