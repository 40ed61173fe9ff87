//! Deterministic synthetic series generation.
//!
//! Every store's forecast is a seeded pseudo-random signal shaped by that
//! store's static profile. The RNG for predicted values is seeded from a
//! stable hash of the store name alone, so the same store always produces
//! a bit-identical forecast regardless of reference date or call order.
//! Observed ("actual") traffic comes from a second RNG seeded per
//! (store, reference date) batch, so drawing actuals never perturbs the
//! predicted stream.

pub mod profiles;

use chrono::{Datelike, Local, NaiveDate, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::series::{Actual, Granularity, SeriesByStore, SeriesRow};
use crate::models::store::ALL_STORES;

/// Weekday bucket labels for daily mode, Monday first.
pub const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// AI staffing recommendation as a fraction of predicted traffic.
const AI_STAFFING_RATIO: f64 = 0.93;

/// Wall-clock sample used to decide which buckets have elapsed.
///
/// Injected explicitly so tests can pin "now" instead of reading the
/// system clock.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub today: NaiveDate,
    /// Current hour of day, 0..=23.
    pub hour: u32,
    /// Current weekday index, 0 = Monday.
    pub weekday: usize,
}

impl Clock {
    /// Sample the local wall clock.
    pub fn now() -> Clock {
        let now = Local::now();
        Clock {
            today: now.date_naive(),
            hour: now.hour(),
            weekday: now.weekday().num_days_from_monday() as usize,
        }
    }
}

/// Stable 64-bit hash of a store name (FNV-1a).
///
/// `std::hash` offers no cross-run stability guarantee, and two unknown
/// store names must still seed distinct streams, so the full name is
/// folded byte by byte.
pub fn store_seed(store: &str) -> u64 {
    store.bytes().fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// AI staffing recommendation for a predicted traffic value.
pub fn ai_staffing(predicted: i64) -> i64 {
    (predicted as f64 * AI_STAFFING_RATIO) as i64
}

/// Generate one store's series for a reference date at the given granularity.
///
/// Unknown store names fall back to the default profile but still seed a
/// distinct stream from their full name.
pub fn generate(
    store: &str,
    reference_date: NaiveDate,
    granularity: Granularity,
    clock: &Clock,
) -> Vec<SeriesRow> {
    match granularity {
        Granularity::Hourly => generate_hourly(store, reference_date, clock),
        Granularity::Daily => generate_daily(store, reference_date, clock),
    }
}

/// Generate series for the whole fleet, keyed by store name.
pub fn generate_all_stores(
    reference_date: NaiveDate,
    granularity: Granularity,
    clock: &Clock,
) -> SeriesByStore {
    ALL_STORES
        .iter()
        .map(|store| {
            (
                store.to_string(),
                generate(store, reference_date, granularity, clock),
            )
        })
        .collect()
}

/// Hourly series: 12 buckets covering the 09:00–21:00 operating day.
fn generate_hourly(store: &str, reference_date: NaiveDate, clock: &Clock) -> Vec<SeriesRow> {
    let profile = profiles::hourly_profile(store);
    let mut rng = StdRng::seed_from_u64(store_seed(store));
    let mut actual_rng = actual_rng(store, reference_date);

    let is_past = reference_date < clock.today;
    let is_today = reference_date == clock.today;

    (0..12i64)
        .map(|i| {
            let hour = 9 + i;

            // Base traffic with random variation
            let mut traffic = profile.base_level + rng.gen_range(-8..12);

            // Peak hour boost
            if profile.peak_hours.contains(&hour) {
                traffic += profile.peak_boost;
            }

            // Gradual increase throughout the day
            traffic += (i as f64 * 4.5) as i64;

            let elapsed = is_past || (is_today && (hour as u32) < clock.hour);
            let actual = realize_actual(traffic, elapsed, &mut actual_rng);

            SeriesRow {
                label: format!("{hour:02}:00"),
                predicted_traffic: traffic,
                actual_traffic: actual,
                baseline_staffing: profile.base_level - 15,
                ai_recommended_staffing: ai_staffing(traffic),
            }
        })
        .collect()
}

/// Daily series: 7 buckets, Monday through Sunday.
///
/// For the current week (reference date equal to today), today's own
/// bucket already carries an actual value; hourly mode excludes the
/// in-progress hour instead.
fn generate_daily(store: &str, reference_date: NaiveDate, clock: &Clock) -> Vec<SeriesRow> {
    let profile = profiles::daily_profile(store);
    let mut rng = StdRng::seed_from_u64(store_seed(store));
    let mut actual_rng = actual_rng(store, reference_date);

    let is_past = reference_date < clock.today;
    let is_today = reference_date == clock.today;

    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, day)| {
            // Base traffic with random variation
            let mut traffic = profile.base_level + rng.gen_range(-50..80);

            // Weekend/peak day boost
            if profile.peak_days.contains(&i) {
                traffic += profile.weekend_boost;
            }

            let elapsed = is_past || (is_today && i <= clock.weekday);
            let actual = realize_actual(traffic, elapsed, &mut actual_rng);

            SeriesRow {
                label: (*day).to_string(),
                predicted_traffic: traffic,
                actual_traffic: actual,
                baseline_staffing: profile.base_level - 120,
                ai_recommended_staffing: ai_staffing(traffic),
            }
        })
        .collect()
}

/// RNG for observed-traffic variance, seeded per (store, reference date).
fn actual_rng(store: &str, reference_date: NaiveDate) -> StdRng {
    StdRng::seed_from_u64(store_seed(store) ^ reference_date.num_days_from_ce() as u64)
}

/// Observed traffic for an elapsed bucket: predicted ±8%.
fn realize_actual(predicted: i64, elapsed: bool, rng: &mut StdRng) -> Actual {
    if elapsed {
        let variance = rng.gen_range(-0.08..0.08);
        Actual::Realized((predicted as f64 * (1.0 + variance)) as i64)
    } else {
        Actual::Pending
    }
}
