use std::collections::BTreeSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One practice interval. Open while `end_time` is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub verses_recited: u32,
    pub pauses_detected: u32,
    pub mistakes_detected: u32,
    pub total_duration_ms: u64,
    pub average_accuracy: f64,
    pub chapters_completed: BTreeSet<u16>,
}

impl Session {
    /// Fresh session starting at `now`, truncated to whole milliseconds so the
    /// stored form round-trips exactly.
    pub fn open(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: now.trunc_subsecs(3),
            end_time: None,
            verses_recited: 0,
            pauses_detected: 0,
            mistakes_detected: 0,
            total_duration_ms: 0,
            average_accuracy: 0.0,
            chapters_completed: BTreeSet::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }
}
