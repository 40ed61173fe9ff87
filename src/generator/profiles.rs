//! Static traffic profiles for each store.
//!
//! The fleet covers London, Copenhagen, and Paris, each with hand-tuned
//! base traffic, peak boosts, and peak periods for both granularities.
//! An unrecognized store name falls back to a default profile — demo
//! tolerance, not a validated error path.

/// Hourly traffic shape for one store.
#[derive(Debug, Clone, Copy)]
pub struct HourlyProfile {
    /// Base visits per operating hour.
    pub base_level: i64,
    /// Extra visits during peak hours.
    pub peak_boost: i64,
    /// Hours of day (24h clock) that receive the peak boost.
    pub peak_hours: &'static [i64],
}

/// Day-of-week traffic shape for one store.
#[derive(Debug, Clone, Copy)]
pub struct DailyProfile {
    /// Base visits per day.
    pub base_level: i64,
    /// Extra visits on peak days.
    pub weekend_boost: i64,
    /// Day indices (0 = Monday) that receive the boost.
    pub peak_days: &'static [usize],
}

/// Returns the hourly profile for a store, or the default profile for
/// any unrecognized name.
pub fn hourly_profile(store: &str) -> HourlyProfile {
    match store {
        // London — lunch and evening rush
        "London" => HourlyProfile {
            base_level: 110,
            peak_boost: 45,
            peak_hours: &[12, 13, 17, 18, 19],
        },
        // Copenhagen — spread-out peaks
        "Copenhagen" => HourlyProfile {
            base_level: 80,
            peak_boost: 35,
            peak_hours: &[11, 14, 16, 18],
        },
        // Paris — afternoon-heavy
        "Paris" => HourlyProfile {
            base_level: 90,
            peak_boost: 40,
            peak_hours: &[13, 15, 17, 18],
        },
        _ => HourlyProfile {
            base_level: 100,
            peak_boost: 35,
            peak_hours: &[12, 18],
        },
    }
}

/// Returns the daily profile for a store, or the default profile for
/// any unrecognized name.
pub fn daily_profile(store: &str) -> DailyProfile {
    match store {
        // London — Fri, Sat, Sun
        "London" => DailyProfile {
            base_level: 950,
            weekend_boost: 450,
            peak_days: &[4, 5, 6],
        },
        // Copenhagen — Thu, Sat, Sun
        "Copenhagen" => DailyProfile {
            base_level: 720,
            weekend_boost: 320,
            peak_days: &[3, 5, 6],
        },
        // Paris — Fri, Sat, Sun
        "Paris" => DailyProfile {
            base_level: 810,
            weekend_boost: 380,
            peak_days: &[4, 5, 6],
        },
        _ => DailyProfile {
            base_level: 850,
            weekend_boost: 350,
            peak_days: &[5, 6],
        },
    }
}
