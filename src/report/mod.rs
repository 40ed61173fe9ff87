//! KPI and forecast-accuracy computation.
//!
//! Consumes generated (possibly adjusted) series, the aggregate table, and
//! the decision history to produce the dashboard's headline numbers. All
//! degenerate inputs degrade to documented defaults — a demo system has no
//! transient external failures to surface.

pub mod staffing;

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::generator::store_seed;
use crate::history::DecisionHistory;
use crate::models::history::Decision;
use crate::models::report::{ForecastAccuracy, KpiSummary};
use crate::models::series::{AggregateTable, Granularity, SeriesByStore, SeriesRow};
use crate::models::store::Scope;

/// Customer visits covered by one full-time-equivalent staff member.
pub const VISITS_PER_FTE: f64 = 50.0;

/// Share of visits that convert into a sale.
pub const CONVERSION_RATE: f64 = 0.20;

/// Average ticket in DKK ($125 × 7.45 DKK/USD).
pub const AVG_TICKET_DKK: f64 = 931.25;

/// Fallback accuracy when no bucket in scope has observed traffic.
const DEFAULT_BASE_ACCURACY: f64 = 92.0;

/// Compute the KPI triple for a scope.
///
/// Staffing efficiency compares realized FTE (AI recommendation where the
/// store followed AI or made no decision, legacy baseline otherwise)
/// against forecast FTE derived from predicted traffic. For the aggregate
/// scope the FTE sums accumulate across all stores before the ratio is
/// taken — it is not an average of per-store ratios. Note the AI
/// recommendation is 93% of predicted traffic, so even perfect adoption
/// reads ~93%, not 100%; that asymmetry is inherited from the original
/// formula and preserved on purpose.
pub fn compute_kpis(
    scope: &Scope,
    series_by_store: &SeriesByStore,
    aggregate: &AggregateTable,
    history: &DecisionHistory,
    reference_date: NaiveDate,
    granularity: Granularity,
) -> KpiSummary {
    let total_traffic = match scope {
        Scope::All => aggregate.total_traffic(),
        Scope::Store(store) => series_by_store
            .get(store.as_str())
            .map_or(0, |rows| rows.iter().map(|r| r.predicted_traffic).sum()),
    };

    let potential_revenue = (total_traffic as f64 * CONVERSION_RATE * AVG_TICKET_DKK) as i64;

    let mut forecasted_fte = 0.0;
    let mut realized_fte = 0.0;
    match scope {
        Scope::All => {
            for (store, rows) in series_by_store {
                accumulate_fte(
                    store,
                    rows,
                    history,
                    reference_date,
                    granularity,
                    &mut forecasted_fte,
                    &mut realized_fte,
                );
            }
        }
        Scope::Store(store) => {
            if let Some(rows) = series_by_store.get(store.as_str()) {
                accumulate_fte(
                    store,
                    rows,
                    history,
                    reference_date,
                    granularity,
                    &mut forecasted_fte,
                    &mut realized_fte,
                );
            }
        }
    }

    let staffing_efficiency = if forecasted_fte > 0.0 {
        (realized_fte / forecasted_fte * 100.0) as i64
    } else {
        100
    };

    KpiSummary {
        total_traffic,
        potential_revenue,
        staffing_efficiency,
    }
}

/// Accumulate forecast and realized FTE for one store's rows.
fn accumulate_fte(
    store: &str,
    rows: &[SeriesRow],
    history: &DecisionHistory,
    reference_date: NaiveDate,
    granularity: Granularity,
    forecasted_fte: &mut f64,
    realized_fte: &mut f64,
) {
    for (index, row) in rows.iter().enumerate() {
        let row_date = row_date(reference_date, granularity, index);
        *forecasted_fte += row.predicted_traffic as f64 / VISITS_PER_FTE;

        // No decision recorded defaults to following AI.
        match history.get(store, row_date) {
            Some(Decision::UsedLegacy) => {
                *realized_fte += row.baseline_staffing as f64 / VISITS_PER_FTE;
            }
            Some(Decision::FollowedAi) | None => {
                *realized_fte += row.ai_recommended_staffing as f64 / VISITS_PER_FTE;
            }
        }
    }
}

/// Calendar date a row maps to for history lookups.
///
/// Hourly buckets all belong to the reference date; daily buckets map to
/// the Monday-of-week of the reference date plus the day index.
pub fn row_date(reference_date: NaiveDate, granularity: Granularity, index: usize) -> NaiveDate {
    match granularity {
        Granularity::Hourly => reference_date,
        Granularity::Daily => {
            let week_start = reference_date
                - Duration::days(i64::from(reference_date.weekday().num_days_from_monday()));
            week_start + Duration::days(index as i64)
        }
    }
}

/// Forecast accuracy for the today / 3-day / week display windows.
///
/// One base value — the mean of `max(0, 1 - |predicted - actual| /
/// predicted) * 100` over every row in scope with positive observed
/// traffic — is jittered per window with a seed derived from the
/// reference date and scope, then clamped to [88, 98]. A future
/// reference date has no observed data and returns the all-zero
/// "not applicable" sentinel.
pub fn compute_forecast_accuracy(
    scope: &Scope,
    series_by_store: &SeriesByStore,
    reference_date: NaiveDate,
    today: NaiveDate,
) -> ForecastAccuracy {
    if reference_date > today {
        return ForecastAccuracy::NOT_APPLICABLE;
    }

    let mut accuracy_values = Vec::new();
    let mut collect = |rows: &[SeriesRow]| {
        for row in rows {
            if let Some(actual) = row.actual_traffic.realized() {
                if actual > 0 {
                    let predicted = row.predicted_traffic as f64;
                    let accuracy = (1.0 - (predicted - actual as f64).abs() / predicted).max(0.0);
                    accuracy_values.push(accuracy * 100.0);
                }
            }
        }
    };

    match scope {
        Scope::All => {
            for rows in series_by_store.values() {
                collect(rows);
            }
        }
        Scope::Store(store) => {
            if let Some(rows) = series_by_store.get(store.as_str()) {
                collect(rows);
            }
        }
    }

    let base = if accuracy_values.is_empty() {
        DEFAULT_BASE_ACCURACY
    } else {
        accuracy_values.iter().sum::<f64>() / accuracy_values.len() as f64
    };

    // Seed from date and scope so each (date, scope) pair shows stable but
    // distinct window values.
    let seed = reference_date.num_days_from_ce() as u64 + store_seed(scope.key()) % 1000;
    let mut rng = StdRng::seed_from_u64(seed);

    let today_acc = (base + rng.gen_range(-0.5..0.5)).clamp(88.0, 98.0);
    let three_day = (base + rng.gen_range(-0.3..0.3)).clamp(88.0, 98.0);
    let week = (base + rng.gen_range(-0.2..0.2)).clamp(88.0, 98.0);

    ForecastAccuracy {
        today: today_acc,
        three_day,
        week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::generator::{self, ai_staffing, Clock};
    use crate::models::series::Actual;

    fn fixed_clock() -> Clock {
        Clock {
            today: NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
            hour: 14,
            weekday: 2,
        }
    }

    fn row(label: &str, predicted: i64, actual: Actual) -> SeriesRow {
        SeriesRow {
            label: label.to_string(),
            predicted_traffic: predicted,
            actual_traffic: actual,
            baseline_staffing: 80,
            ai_recommended_staffing: ai_staffing(predicted),
        }
    }

    fn single_store(rows: Vec<SeriesRow>) -> SeriesByStore {
        let mut map = SeriesByStore::new();
        map.insert("London".to_string(), rows);
        map
    }

    fn empty_aggregate() -> AggregateTable {
        AggregateTable { rows: Vec::new() }
    }

    #[test]
    fn test_revenue_is_twenty_percent_conversion_times_ticket() {
        let series = single_store(vec![row("09:00", 1000, Actual::Pending)]);
        let kpis = compute_kpis(
            &Scope::Store("London".to_string()),
            &series,
            &empty_aggregate(),
            &DecisionHistory::empty(),
            fixed_clock().today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.total_traffic, 1000);
        assert_eq!(kpis.potential_revenue, (1000.0 * 0.20 * 931.25) as i64);
    }

    #[test]
    fn test_efficiency_with_full_ai_adoption_reads_ninety_three() {
        // predicted 100 → ai 93; the ratio is 93%, not 100% — the literal
        // formula compares realized AI staffing against raw predicted FTE.
        let series = single_store(vec![
            row("09:00", 100, Actual::Pending),
            row("10:00", 100, Actual::Pending),
        ]);
        let mut history = DecisionHistory::empty();
        history.record("London", fixed_clock().today, Decision::FollowedAi);

        let kpis = compute_kpis(
            &Scope::Store("London".to_string()),
            &series,
            &empty_aggregate(),
            &history,
            fixed_clock().today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.staffing_efficiency, 93);
    }

    #[test]
    fn test_absent_decision_defaults_to_ai() {
        let series = single_store(vec![row("09:00", 100, Actual::Pending)]);
        let kpis = compute_kpis(
            &Scope::Store("London".to_string()),
            &series,
            &empty_aggregate(),
            &DecisionHistory::empty(),
            fixed_clock().today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.staffing_efficiency, 93);
    }

    #[test]
    fn test_legacy_decision_switches_realized_basis() {
        // baseline 80 vs predicted 100 → 80%.
        let series = single_store(vec![row("09:00", 100, Actual::Pending)]);
        let mut history = DecisionHistory::empty();
        history.record("London", fixed_clock().today, Decision::UsedLegacy);

        let kpis = compute_kpis(
            &Scope::Store("London".to_string()),
            &series,
            &empty_aggregate(),
            &history,
            fixed_clock().today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.staffing_efficiency, 80);
    }

    #[test]
    fn test_zero_forecast_fte_defaults_to_one_hundred() {
        let series = single_store(Vec::new());
        let kpis = compute_kpis(
            &Scope::Store("London".to_string()),
            &series,
            &empty_aggregate(),
            &DecisionHistory::empty(),
            fixed_clock().today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.staffing_efficiency, 100);
    }

    #[test]
    fn test_aggregate_scope_accumulates_before_ratio() {
        let clock = fixed_clock();
        let series = generator::generate_all_stores(clock.today, Granularity::Hourly, &clock);
        let table = aggregate(&series).unwrap();
        let kpis = compute_kpis(
            &Scope::All,
            &series,
            &table,
            &DecisionHistory::empty(),
            clock.today,
            Granularity::Hourly,
        );
        assert_eq!(kpis.total_traffic, table.total_traffic());
        // All decisions absent ⇒ everything realizes at the AI ratio.
        assert!(kpis.staffing_efficiency == 92 || kpis.staffing_efficiency == 93);
    }

    #[test]
    fn test_daily_rows_map_to_monday_anchored_dates() {
        // 2025-06-11 is a Wednesday; its week starts Monday 2025-06-09.
        let reference = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        assert_eq!(
            row_date(reference, Granularity::Daily, 0),
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
        assert_eq!(
            row_date(reference, Granularity::Daily, 6),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
        assert_eq!(row_date(reference, Granularity::Hourly, 5), reference);
    }

    #[test]
    fn test_future_reference_date_returns_not_applicable() {
        let clock = fixed_clock();
        let tomorrow = clock.today + Duration::days(1);
        let series = generator::generate_all_stores(tomorrow, Granularity::Hourly, &clock);
        let accuracy = compute_forecast_accuracy(&Scope::All, &series, tomorrow, clock.today);
        assert!(accuracy.is_not_applicable());
    }

    #[test]
    fn test_accuracy_with_observed_data_stays_clamped() {
        let clock = fixed_clock();
        let yesterday = clock.today - Duration::days(1);
        let series = generator::generate_all_stores(yesterday, Granularity::Hourly, &clock);
        let accuracy = compute_forecast_accuracy(&Scope::All, &series, yesterday, clock.today);
        for value in [accuracy.today, accuracy.three_day, accuracy.week] {
            assert!((88.0..=98.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn test_accuracy_without_observed_data_uses_default_base() {
        let series = single_store(vec![row("09:00", 100, Actual::Pending)]);
        let today = fixed_clock().today;
        let accuracy = compute_forecast_accuracy(
            &Scope::Store("London".to_string()),
            &series,
            today,
            today,
        );
        // Base 92.0 with at most ±0.5 jitter.
        assert!((91.5..=92.5).contains(&accuracy.today));
        assert!((91.7..=92.3).contains(&accuracy.three_day));
        assert!((91.8..=92.2).contains(&accuracy.week));
    }

    #[test]
    fn test_accuracy_is_stable_per_date_and_scope() {
        let clock = fixed_clock();
        let yesterday = clock.today - Duration::days(1);
        let series = generator::generate_all_stores(yesterday, Granularity::Daily, &clock);
        let scope = Scope::Store("Paris".to_string());
        let a = compute_forecast_accuracy(&scope, &series, yesterday, clock.today);
        let b = compute_forecast_accuracy(&scope, &series, yesterday, clock.today);
        assert_eq!(a, b);
        // A different scope over the same data jitters differently.
        let c = compute_forecast_accuracy(&Scope::All, &series, yesterday, clock.today);
        assert_ne!(a, c);
    }

    #[test]
    fn test_measured_zero_actual_is_excluded_from_the_sample() {
        let series = single_store(vec![row("09:00", 100, Actual::Realized(0))]);
        let today = fixed_clock().today;
        let accuracy = compute_forecast_accuracy(
            &Scope::Store("London".to_string()),
            &series,
            today,
            today,
        );
        // Zero actuals don't qualify, so the default base applies.
        assert!((91.5..=92.5).contains(&accuracy.today));
    }
}
