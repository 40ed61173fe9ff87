use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A store manager's staffing decision for one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The store ran the AI-recommended staffing plan.
    FollowedAi,
    /// The store kept the legacy flat staffing plan.
    UsedLegacy,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::FollowedAi => write!(f, "followed_ai"),
            Decision::UsedLegacy => write!(f, "used_legacy"),
        }
    }
}

/// One day of a store's 30-day decision calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Short weekday label ("Mon".."Sun") for rendering.
    pub weekday: String,
    /// The recorded decision, absent when no decision exists for this day.
    pub decision: Option<Decision>,
    /// Zero-based week row within the 30-day grid.
    pub week: i64,
}

/// Per-store AI-adoption figures derived from the decision history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionSummary {
    pub store: String,
    /// `ai_days / total_days * 100`, 0 when no days are recorded.
    pub adoption_rate: f64,
    pub total_days: usize,
    pub ai_days: usize,
}
