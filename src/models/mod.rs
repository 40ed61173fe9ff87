//! Domain models for the forecasting dashboard core.
//!
//! These types are shared across all modules: generator, adjust, aggregate,
//! history, report, and session.

pub mod history;
pub mod report;
pub mod series;
pub mod store;
