use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::models::Session;
use crate::validation::ValidationResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} is already open")]
    AlreadyOpen(String),
    #[error("no session is open")]
    NoOpenSession,
    #[error("session {0} has not been closed")]
    NotClosed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    NoSession,
    Open(Session),
    Closed(Session),
}

/// Owns the single open session and folds recitation events into it.
///
/// Every operation either applies fully or leaves the state untouched and
/// returns a [`SessionError`].
#[derive(Debug, Default)]
pub struct SessionAggregator {
    state: SessionState,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// The open session, if any.
    pub fn current(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Open(session) => Some(session),
            _ => None,
        }
    }

    pub fn start_session(&mut self, now: DateTime<Utc>) -> Result<Session, SessionError> {
        if let SessionState::Open(session) = &self.state {
            return Err(SessionError::AlreadyOpen(session.id.clone()));
        }
        let session = Session::open(now);
        self.state = SessionState::Open(session.clone());
        Ok(session)
    }

    pub fn record_verse_completion(&mut self, result: &ValidationResult) -> Result<(), SessionError> {
        let session = self.open_mut()?;

        let verses = session.verses_recited.saturating_add(1);
        let mistakes = u32::try_from(result.mistakes.len()).unwrap_or(u32::MAX);
        let accuracy_sum =
            session.average_accuracy * f64::from(session.verses_recited) + result.accuracy_percent;

        session.verses_recited = verses;
        session.mistakes_detected = session.mistakes_detected.saturating_add(mistakes);
        session.average_accuracy = accuracy_sum / f64::from(verses);
        Ok(())
    }

    pub fn record_pause(&mut self) -> Result<(), SessionError> {
        let session = self.open_mut()?;
        session.pauses_detected = session.pauses_detected.saturating_add(1);
        Ok(())
    }

    pub fn record_chapter_completion(&mut self, chapter: u16) -> Result<(), SessionError> {
        self.open_mut()?.chapters_completed.insert(chapter);
        Ok(())
    }

    /// Close the open session and hand back the finished record.
    pub fn end_session(&mut self, now: DateTime<Utc>) -> Result<Session, SessionError> {
        let mut session = self.open_mut()?.clone();
        let end_time = now.trunc_subsecs(3);

        session.total_duration_ms = (end_time - session.start_time)
            .num_milliseconds()
            .max(0) as u64;
        session.end_time = Some(end_time);

        self.state = SessionState::Closed(session.clone());
        Ok(session)
    }

    fn open_mut(&mut self) -> Result<&mut Session, SessionError> {
        match &mut self.state {
            SessionState::Open(session) => Ok(session),
            _ => Err(SessionError::NoOpenSession),
        }
    }
}
