//! Retail Forecast Demo — Shared Library
//!
//! This crate contains the data derivation and state-mutation pipeline
//! behind the store-traffic forecasting dashboard: deterministic synthetic
//! series generation, manual forecast adjustments, cross-store aggregation,
//! KPI/accuracy computation, and the AI-adoption decision history.
//!
//! Each serverless function in `api/` and the CLI in `src/bin/` imports
//! from this library to keep consumers thin and logic reusable. There is
//! no real forecasting model behind any of this — every series is a
//! seeded pseudo-random signal shaped by hand-tuned per-store constants.

pub mod adjust;
pub mod aggregate;
pub mod error;
pub mod generator;
pub mod history;
pub mod models;
pub mod report;
pub mod session;

pub use error::CoreError;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
