//! Explicit session state for one dashboard user.
//!
//! All mutable state — granularity, manual adjustments, decision history —
//! lives in one `DashboardSession` passed by reference into the pure
//! pipeline functions. Every render is a short-lived, total recomputation
//! from this state: generate, adjust, aggregate, report. Nothing survives
//! a process restart beyond the deterministic seeded history.

use chrono::NaiveDate;
use tracing::debug;

use crate::adjust::{self, AdjustmentMap};
use crate::aggregate::aggregate;
use crate::error::CoreError;
use crate::generator::{self, Clock};
use crate::history::DecisionHistory;
use crate::models::history::Decision;
use crate::models::report::DashboardSnapshot;
use crate::models::series::Granularity;
use crate::models::store::Scope;
use crate::report::{self, staffing};

/// Process-lifetime state for a single interactive session.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    granularity: Granularity,
    adjustments: AdjustmentMap,
    history: DecisionHistory,
}

impl DashboardSession {
    /// Start a session with the seeded 29-day decision history.
    pub fn new(today: NaiveDate) -> DashboardSession {
        DashboardSession {
            granularity: Granularity::Hourly,
            adjustments: AdjustmentMap::new(),
            history: DecisionHistory::seeded(today),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn adjustments(&self) -> &AdjustmentMap {
        &self.adjustments
    }

    pub fn history(&self) -> &DecisionHistory {
        &self.history
    }

    /// Switch between hourly and daily bucketing.
    ///
    /// Bucket labels are not comparable across granularities, so every
    /// stored adjustment is dropped on an actual switch.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        if granularity != self.granularity {
            debug!(%granularity, "granularity switched, clearing adjustments");
            self.adjustments.clear();
            self.granularity = granularity;
        }
    }

    /// Set or clear (percent = 0) one bucket's adjustment.
    pub fn set_adjustment(&mut self, store: &str, label: &str, percent: i32) -> Result<(), CoreError> {
        self.adjustments.set(store, label, percent)
    }

    /// Drop all adjustments for one store.
    pub fn clear_store_adjustments(&mut self, store: &str) {
        self.adjustments.clear_store(store);
    }

    /// Record today's staffing decision for one store (idempotent upsert).
    pub fn record_decision(&mut self, store: &str, decision: Decision, today: NaiveDate) {
        self.history.record(store, today, decision);
    }

    /// Render one full dashboard view for a scope and reference date.
    ///
    /// Pure with respect to session state: generation, adjustment
    /// application, aggregation, and every report all happen on cloned or
    /// freshly derived data.
    pub fn render(
        &self,
        scope: &Scope,
        reference_date: NaiveDate,
        clock: &Clock,
    ) -> Result<DashboardSnapshot, CoreError> {
        let generated = generator::generate_all_stores(reference_date, self.granularity, clock);
        let series_by_store = adjust::apply_adjustments(&generated, &self.adjustments);
        let aggregate = aggregate(&series_by_store)?;

        let kpis = report::compute_kpis(
            scope,
            &series_by_store,
            &aggregate,
            &self.history,
            reference_date,
            self.granularity,
        );
        let accuracy = report::compute_forecast_accuracy(
            scope,
            &series_by_store,
            reference_date,
            clock.today,
        );
        let staffing = staffing::staffing_comparison(scope, &series_by_store, self.granularity);
        let adoption_trend = staffing::adoption_trend(scope, &self.history, clock.today);
        let adoption_summary = self.history.adoption_summary();
        let calendar = match scope {
            Scope::Store(store) => Some(self.history.calendar(store, clock.today)),
            Scope::All => None,
        };

        Ok(DashboardSnapshot {
            scope: scope.to_string(),
            reference_date,
            granularity: self.granularity,
            series_by_store,
            aggregate,
            kpis,
            accuracy,
            staffing,
            adoption_trend,
            adoption_summary,
            calendar,
        })
    }
}
