//! Usage categories and calendar-month accounting windows.

use chrono::{DateTime, Datelike, Local, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Category of billable action a shop can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// Product description / bulk analysis content.
    Description,
    /// 8-second product ad clips.
    Ad,
    /// Music video scene sets.
    MusicVideo,
}

impl ActionCategory {
    /// Stable string used in the persisted ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Description => "description",
            ActionCategory::Ad => "ad",
            ActionCategory::MusicVideo => "music_video",
        }
    }

    /// Parses the persisted ledger value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "description" => Some(ActionCategory::Description),
            "ad" => Some(ActionCategory::Ad),
            "music_video" => Some(ActionCategory::MusicVideo),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category usage counters for the current calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub descriptions: u32,
    pub ads: u32,
    pub music_videos: u32,
    /// First instant of the next month, when all counters reset.
    pub reset_date: DateTime<Utc>,
}

impl MonthlyUsage {
    /// Returns the counter for a category.
    pub fn for_category(&self, category: ActionCategory) -> u32 {
        match category {
            ActionCategory::Description => self.descriptions,
            ActionCategory::Ad => self.ads,
            ActionCategory::MusicVideo => self.music_videos,
        }
    }
}

/// First instant of the current calendar month, process-local clock.
///
/// The quota window resets discretely at month start; there is no rolling
/// 30-day window. Returned in UTC for ledger queries.
pub fn start_of_current_month() -> DateTime<Utc> {
    start_of_month_at(Local::now())
}

/// First instant of the month containing `now`, for the local offset of `now`.
pub fn start_of_month_at(now: DateTime<Local>) -> DateTime<Utc> {
    let first = now
        .timezone()
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        // Midnight on the 1st exists in every IANA offset in use.
        .unwrap_or(now);
    first.with_timezone(&Utc)
}

/// First instant of the month after the one containing `start_of_month`.
pub fn next_reset_after(start_of_month: DateTime<Utc>) -> DateTime<Utc> {
    start_of_month
        .checked_add_months(Months::new(1))
        .unwrap_or(start_of_month)
}
