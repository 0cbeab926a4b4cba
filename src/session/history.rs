use serde::{Deserialize, Serialize};

use crate::models::Session;

use super::state::SessionError;

/// Number of closed sessions kept in history.
pub const MAX_HISTORY: usize = 50;

/// Closed sessions, most recent first, capped at [`MAX_HISTORY`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SessionHistory {
    sessions: Vec<Session>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild history from stored sessions in any order.
    pub fn from_sessions(mut sessions: Vec<Session>) -> Self {
        sessions.retain(Session::is_closed);
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        sessions.truncate(MAX_HISTORY);
        Self { sessions }
    }

    /// Add a closed session at the front, evicting the oldest past the cap.
    pub fn push(&mut self, session: Session) -> Result<(), SessionError> {
        if !session.is_closed() {
            return Err(SessionError::NotClosed(session.id));
        }
        self.sessions.insert(0, session);
        self.sessions.truncate(MAX_HISTORY);
        Ok(())
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn latest(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
