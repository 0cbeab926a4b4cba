use serde::{Deserialize, Serialize};

/// Totals over a set of closed sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_sessions: u32,
    pub total_duration_ms: u64,
    pub total_verses_recited: u32,
    pub total_mistakes: u32,
    pub total_pauses: u32,
    pub average_accuracy: f64,
    pub streak_days: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    FirstSession,
    TenSessions,
    HundredVerses,
    WeekStreak,
    HighAccuracy,
}

impl Achievement {
    /// Every achievement in display order.
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstSession,
        Achievement::TenSessions,
        Achievement::HundredVerses,
        Achievement::WeekStreak,
        Achievement::HighAccuracy,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstSession => "First Steps",
            Achievement::TenSessions => "Dedicated Reciter",
            Achievement::HundredVerses => "Hundred Verses",
            Achievement::WeekStreak => "Week Streak",
            Achievement::HighAccuracy => "Precise Recitation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstSession => "Complete your first session",
            Achievement::TenSessions => "Complete 10 sessions",
            Achievement::HundredVerses => "Recite 100 verses",
            Achievement::WeekStreak => "Practice 7 days in a row",
            Achievement::HighAccuracy => "Keep average accuracy at 90% or above",
        }
    }
}
