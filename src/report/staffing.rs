//! Staffing recommendation comparison and adoption trend.
//!
//! Sidebar-style derived views: average legacy vs AI FTE with the revenue
//! impact of optimal staffing, and recent adoption rates per scope.

use chrono::{Duration, NaiveDate};

use super::{AVG_TICKET_DKK, CONVERSION_RATE, VISITS_PER_FTE};
use crate::history::DecisionHistory;
use crate::models::history::Decision;
use crate::models::report::{AdoptionTrend, StaffingComparison};
use crate::models::series::{Granularity, SeriesByStore, SeriesRow};
use crate::models::store::Scope;

/// Conversion-rate improvement attributed to optimal staffing.
const CONVERSION_IMPROVEMENT: f64 = 0.05;

/// Compare average legacy FTE against average AI FTE for a scope.
///
/// Per store, both figures are the mean of `staffing / 50` across the
/// view's buckets; the aggregate scope sums the per-store means. The
/// revenue impact prices the conversion improvement over the scope's
/// total predicted traffic: per-day in hourly mode, per-week (with a
/// divided per-day figure) in daily mode.
pub fn staffing_comparison(
    scope: &Scope,
    series_by_store: &SeriesByStore,
    granularity: Granularity,
) -> StaffingComparison {
    let mut baseline_fte = 0.0;
    let mut ai_fte = 0.0;
    let mut total_traffic = 0i64;

    let mut add_store = |rows: &[SeriesRow]| {
        if rows.is_empty() {
            return;
        }
        let count = rows.len() as f64;
        baseline_fte += rows
            .iter()
            .map(|r| r.baseline_staffing as f64 / VISITS_PER_FTE)
            .sum::<f64>()
            / count;
        ai_fte += rows
            .iter()
            .map(|r| r.ai_recommended_staffing as f64 / VISITS_PER_FTE)
            .sum::<f64>()
            / count;
        total_traffic += rows.iter().map(|r| r.predicted_traffic).sum::<i64>();
    };

    match scope {
        Scope::All => {
            for rows in series_by_store.values() {
                add_store(rows);
            }
        }
        Scope::Store(store) => {
            if let Some(rows) = series_by_store.get(store.as_str()) {
                add_store(rows);
            }
        }
    }

    let revenue_impact =
        (total_traffic as f64 * CONVERSION_IMPROVEMENT * CONVERSION_RATE * AVG_TICKET_DKK) as i64;
    let (revenue_impact_per_day, revenue_impact_per_week) = match granularity {
        Granularity::Hourly => (revenue_impact, None),
        Granularity::Daily => (revenue_impact / 7, Some(revenue_impact)),
    };

    StaffingComparison {
        baseline_fte,
        ai_fte,
        fte_difference: baseline_fte - ai_fte,
        revenue_impact_per_day,
        revenue_impact_per_week,
    }
}

/// Adoption rate over the today / 3-day / 7-day windows.
///
/// For a single store this scans the history backwards from today,
/// counting a missing day as legacy. The aggregate scope keeps the
/// original demo's fixed fleet-wide figures.
pub fn adoption_trend(scope: &Scope, history: &DecisionHistory, today: NaiveDate) -> AdoptionTrend {
    match scope {
        Scope::All => AdoptionTrend {
            today: 85.0,
            three_day: 81.7,
            week: 83.3,
        },
        Scope::Store(store) => {
            let followed_today =
                history.get(store, today) == Some(Decision::FollowedAi);
            AdoptionTrend {
                today: if followed_today { 100.0 } else { 0.0 },
                three_day: window_rate(store, history, today, 3),
                week: window_rate(store, history, today, 7),
            }
        }
    }
}

fn window_rate(store: &str, history: &DecisionHistory, today: NaiveDate, days: i64) -> f64 {
    let followed = (0..days)
        .filter(|offset| {
            history.get(store, today - Duration::days(*offset)) == Some(Decision::FollowedAi)
        })
        .count();
    followed as f64 / days as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ai_staffing;
    use crate::models::series::Actual;

    fn row(label: &str, predicted: i64, baseline: i64) -> SeriesRow {
        SeriesRow {
            label: label.to_string(),
            predicted_traffic: predicted,
            actual_traffic: Actual::Pending,
            baseline_staffing: baseline,
            ai_recommended_staffing: ai_staffing(predicted),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
    }

    #[test]
    fn test_single_store_fte_averages() {
        let mut series = SeriesByStore::new();
        series.insert(
            "London".to_string(),
            vec![row("09:00", 100, 95), row("10:00", 200, 95)],
        );
        let comparison = staffing_comparison(
            &Scope::Store("London".to_string()),
            &series,
            Granularity::Hourly,
        );
        // baseline: mean(95/50, 95/50) = 1.9; ai: mean(93/50, 186/50) = 2.79
        assert!((comparison.baseline_fte - 1.9).abs() < 1e-9);
        assert!((comparison.ai_fte - 2.79).abs() < 1e-9);
        assert!((comparison.fte_difference - (1.9 - 2.79)).abs() < 1e-9);
        assert_eq!(
            comparison.revenue_impact_per_day,
            (300.0 * 0.05 * 0.20 * 931.25) as i64
        );
        assert_eq!(comparison.revenue_impact_per_week, None);
    }

    #[test]
    fn test_aggregate_sums_per_store_means() {
        let mut series = SeriesByStore::new();
        series.insert("Copenhagen".to_string(), vec![row("Monday", 700, 600)]);
        series.insert("London".to_string(), vec![row("Monday", 1000, 830)]);
        let comparison = staffing_comparison(&Scope::All, &series, Granularity::Daily);
        assert!((comparison.baseline_fte - (600.0 / 50.0 + 830.0 / 50.0)).abs() < 1e-9);
        let weekly = (1700.0 * 0.05 * 0.20 * 931.25) as i64;
        assert_eq!(comparison.revenue_impact_per_week, Some(weekly));
        assert_eq!(comparison.revenue_impact_per_day, weekly / 7);
    }

    #[test]
    fn test_adoption_trend_counts_followed_days() {
        let mut history = DecisionHistory::empty();
        history.record("London", today(), Decision::FollowedAi);
        history.record("London", today() - Duration::days(1), Decision::UsedLegacy);
        history.record("London", today() - Duration::days(2), Decision::FollowedAi);

        let trend = adoption_trend(&Scope::Store("London".to_string()), &history, today());
        assert_eq!(trend.today, 100.0);
        // 2 of 3 days followed.
        assert!((trend.three_day - 200.0 / 3.0).abs() < 1e-9);
        // Days 3..6 are unrecorded and count as legacy.
        assert!((trend.week - 2.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_adoption_trend_today_without_decision_is_zero() {
        let trend = adoption_trend(
            &Scope::Store("London".to_string()),
            &DecisionHistory::empty(),
            today(),
        );
        assert_eq!(trend.today, 0.0);
        assert_eq!(trend.three_day, 0.0);
        assert_eq!(trend.week, 0.0);
    }

    #[test]
    fn test_aggregate_trend_uses_fleet_figures() {
        let trend = adoption_trend(&Scope::All, &DecisionHistory::empty(), today());
        assert_eq!(trend.today, 85.0);
        assert_eq!(trend.three_day, 81.7);
        assert_eq!(trend.week, 83.3);
    }
}
