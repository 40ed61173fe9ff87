//! Decision history — which staffing plan each store actually ran per day.
//!
//! Seeded once per session with 29 days of synthetic decisions (today
//! excluded, so the user gets to make today's choice), then mutated only
//! by explicit "record today's decision" actions. Store-specific
//! adoption probabilities give each store a believable track record.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::history::{AdoptionSummary, CalendarDay, Decision};
use crate::models::store::ALL_STORES;

/// Seed for the synthetic decision history.
const HISTORY_SEED: u64 = 42;

/// Days of synthetic history per store, offsets 1..=29 back from today.
const SEEDED_DAYS: u64 = 29;

/// Probability that a store followed the AI recommendation on a seeded day.
fn adoption_probability(store: &str) -> f64 {
    match store {
        "London" => 0.85,
        "Copenhagen" => 0.70,
        "Paris" => 0.90,
        _ => 0.75,
    }
}

/// Process-lifetime store of per-day staffing decisions.
///
/// `BTreeMap` on both levels keeps iteration in store order and date order,
/// which makes seeding reproducible and calendar scans trivial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionHistory {
    entries: BTreeMap<String, BTreeMap<NaiveDate, Decision>>,
}

impl DecisionHistory {
    /// An empty history with no stores tracked.
    pub fn empty() -> DecisionHistory {
        DecisionHistory::default()
    }

    /// Seed 29 days of synthetic decisions per store, today excluded.
    ///
    /// Decisions are independent Bernoulli draws at each store's adoption
    /// probability, drawn in fleet order from one fixed-seed RNG, so the
    /// seeded history is identical for any two sessions started on the
    /// same day.
    pub fn seeded(today: NaiveDate) -> DecisionHistory {
        let mut rng = StdRng::seed_from_u64(HISTORY_SEED);
        let mut entries: BTreeMap<String, BTreeMap<NaiveDate, Decision>> = BTreeMap::new();

        for store in ALL_STORES {
            let probability = adoption_probability(store);
            let days = entries.entry(store.to_string()).or_default();
            for offset in 1..=SEEDED_DAYS {
                let date = today - Duration::days(offset as i64);
                let decision = if rng.gen::<f64>() < probability {
                    Decision::FollowedAi
                } else {
                    Decision::UsedLegacy
                };
                days.insert(date, decision);
            }
        }

        DecisionHistory { entries }
    }

    /// Upsert one store's decision for a date. Overwrites any existing entry.
    pub fn record(&mut self, store: &str, date: NaiveDate, decision: Decision) {
        self.entries
            .entry(store.to_string())
            .or_default()
            .insert(date, decision);
    }

    /// Look up one store's decision for a date.
    pub fn get(&self, store: &str, date: NaiveDate) -> Option<Decision> {
        self.entries
            .get(store)
            .and_then(|days| days.get(&date))
            .copied()
    }

    /// Number of recorded days for a store.
    pub fn days_recorded(&self, store: &str) -> usize {
        self.entries.get(store).map_or(0, BTreeMap::len)
    }

    /// Last-30-days calendar for one store, oldest day first, today last.
    ///
    /// Days without a decision (today before the user acts, or any gap)
    /// come back with `decision: None`.
    pub fn calendar(&self, store: &str, today: NaiveDate) -> Vec<CalendarDay> {
        (0..30)
            .map(|i| {
                let date = today - Duration::days(29 - i);
                CalendarDay {
                    date,
                    weekday: date.weekday().to_string(),
                    decision: self.get(store, date),
                    week: i / 7,
                }
            })
            .collect()
    }

    /// Per-store adoption rates over each store's full recorded history.
    pub fn adoption_summary(&self) -> Vec<AdoptionSummary> {
        ALL_STORES
            .iter()
            .map(|store| {
                let days = self.entries.get(*store);
                let total_days = days.map_or(0, BTreeMap::len);
                let ai_days = days.map_or(0, |days| {
                    days.values()
                        .filter(|&&d| d == Decision::FollowedAi)
                        .count()
                });
                let adoption_rate = if total_days > 0 {
                    ai_days as f64 / total_days as f64 * 100.0
                } else {
                    0.0
                };
                AdoptionSummary {
                    store: (*store).to_string(),
                    adoption_rate,
                    total_days,
                    ai_days,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
    }

    #[test]
    fn test_seeding_fills_29_days_per_store() {
        let history = DecisionHistory::seeded(today());
        for store in ALL_STORES {
            assert_eq!(history.days_recorded(store), 29);
        }
    }

    #[test]
    fn test_seeding_excludes_today() {
        let history = DecisionHistory::seeded(today());
        for store in ALL_STORES {
            assert_eq!(history.get(store, today()), None);
            assert!(history.get(store, today() - Duration::days(1)).is_some());
            assert!(history.get(store, today() - Duration::days(29)).is_some());
            assert_eq!(history.get(store, today() - Duration::days(30)), None);
        }
    }

    #[test]
    fn test_seeding_is_reproducible() {
        let a = DecisionHistory::seeded(today());
        let b = DecisionHistory::seeded(today());
        for store in ALL_STORES {
            for offset in 1..=29 {
                let date = today() - Duration::days(offset);
                assert_eq!(a.get(store, date), b.get(store, date));
            }
        }
    }

    #[test]
    fn test_record_overwrites_existing_entry() {
        let mut history = DecisionHistory::empty();
        history.record("London", today(), Decision::UsedLegacy);
        history.record("London", today(), Decision::FollowedAi);
        assert_eq!(history.get("London", today()), Some(Decision::FollowedAi));
        assert_eq!(history.days_recorded("London"), 1);
    }

    #[test]
    fn test_london_adoption_is_near_its_probability() {
        let history = DecisionHistory::seeded(today());
        let summary = history.adoption_summary();
        let london = summary.iter().find(|s| s.store == "London").unwrap();
        assert_eq!(london.total_days, 29);
        // 29 Bernoulli(0.85) draws; well above one-in-a-million to land here.
        assert!(
            london.adoption_rate > 60.0,
            "London adoption {} unexpectedly low",
            london.adoption_rate
        );
        assert!((london.adoption_rate
            - london.ai_days as f64 / london.total_days as f64 * 100.0)
            .abs()
            < f64::EPSILON);
    }

    #[test]
    fn test_adoption_summary_handles_empty_history() {
        let summary = DecisionHistory::empty().adoption_summary();
        assert_eq!(summary.len(), 3);
        for entry in summary {
            assert_eq!(entry.adoption_rate, 0.0);
            assert_eq!(entry.total_days, 0);
        }
    }

    #[test]
    fn test_calendar_spans_30_days_ending_today() {
        let mut history = DecisionHistory::seeded(today());
        history.record("London", today(), Decision::FollowedAi);

        let calendar = history.calendar("London", today());
        assert_eq!(calendar.len(), 30);
        assert_eq!(calendar[0].date, today() - Duration::days(29));
        assert_eq!(calendar[29].date, today());
        assert_eq!(calendar[29].decision, Some(Decision::FollowedAi));
        // Day 0 of the seeded window is outside the 29 seeded offsets.
        assert!(calendar[0].decision.is_some());
        assert_eq!(calendar[0].week, 0);
        assert_eq!(calendar[29].week, 4);
    }
}
