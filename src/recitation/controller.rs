use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};

use crate::{
    corpus::{CanonicalVerse, VerseCorpus, VerseReference},
    db::Database,
    models::{Achievement, Session, Stats},
    session::{
        compute_achievements, compute_stats, SessionAggregator, SessionError, SessionHistory,
    },
    settings::SettingsStore,
    validation::{RecitationValidator, ValidationResult},
};

use super::speech::AudioEvent;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

const EVENT_CAPACITY: usize = 64;
const FIRST_VERSE: VerseReference = VerseReference::new(1, 1);

/// Notifications for the host UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecitationEvent {
    #[serde(rename_all = "camelCase")]
    SessionStarted { session: Session },
    #[serde(rename_all = "camelCase")]
    VerseValidated {
        reference: VerseReference,
        result: ValidationResult,
        chapter_progress: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    PauseRecorded { pauses_detected: u32 },
    #[serde(rename_all = "camelCase")]
    ChapterCompleted { chapter: u16 },
    #[serde(rename_all = "camelCase")]
    VerseChanged { reference: VerseReference },
    #[serde(rename_all = "camelCase")]
    SessionEnded { session: Session },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecitationSnapshot {
    pub session: Option<Session>,
    pub current_verse: VerseReference,
    pub chapter_progress: Option<f64>,
}

struct ControllerState {
    aggregator: SessionAggregator,
    history: SessionHistory,
    current_verse: VerseReference,
}

/// Ties validation, the open session and stored history together.
///
/// Cloning yields another handle to the same state. All mutations go through
/// one mutex, so events are applied in arrival order.
#[derive(Clone)]
pub struct RecitationController {
    state: Arc<Mutex<ControllerState>>,
    corpus: Arc<dyn VerseCorpus>,
    validator: RecitationValidator,
    db: Database,
    settings: Arc<SettingsStore>,
    events: broadcast::Sender<RecitationEvent>,
}

impl RecitationController {
    /// Build a controller with history loaded from `db`.
    pub async fn new(
        corpus: Arc<dyn VerseCorpus>,
        db: Database,
        settings: Arc<SettingsStore>,
    ) -> Result<Self> {
        let history = db.load_history().await?;
        log_info!("Loaded {} sessions from history", history.len());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let current_verse = if corpus.verse(FIRST_VERSE).is_some() {
            FIRST_VERSE
        } else {
            corpus.next_recitable_verse(FIRST_VERSE).unwrap_or(FIRST_VERSE)
        };

        Ok(Self {
            state: Arc::new(Mutex::new(ControllerState {
                aggregator: SessionAggregator::new(),
                history,
                current_verse,
            })),
            validator: RecitationValidator::new(corpus.clone()),
            corpus,
            db,
            settings,
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RecitationEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> RecitationSnapshot {
        let state = self.state.lock().await;
        RecitationSnapshot {
            session: state.aggregator.current().cloned(),
            current_verse: state.current_verse,
            chapter_progress: self.corpus.chapter_progress(state.current_verse),
        }
    }

    pub async fn is_session_open(&self) -> bool {
        self.state.lock().await.aggregator.is_open()
    }

    pub async fn current_verse(&self) -> VerseReference {
        self.state.lock().await.current_verse
    }

    /// Canonical text of the verse in focus, if the corpus has it.
    pub async fn expected_verse(&self) -> Option<CanonicalVerse> {
        let reference = self.current_verse().await;
        self.corpus.verse(reference)
    }

    pub async fn select_verse(&self, reference: VerseReference) -> Result<()> {
        let total = self
            .corpus
            .chapter_meta(reference.chapter)
            .map(|meta| meta.total_verses)
            .ok_or_else(|| anyhow::anyhow!("unknown chapter {}", reference.chapter))?;
        if reference.verse == 0 || reference.verse > total {
            anyhow::bail!("chapter {} has no verse {}", reference.chapter, reference.verse);
        }
        if self.corpus.verse(reference).is_none() {
            anyhow::bail!("no text loaded for verse {reference}");
        }

        self.state.lock().await.current_verse = reference;
        self.emit(RecitationEvent::VerseChanged { reference });
        Ok(())
    }

    pub async fn start_session(&self) -> Result<Session> {
        let session = {
            let mut state = self.state.lock().await;
            state.aggregator.start_session(Utc::now())?
        };

        log_info!("Session {} started", session.id);
        self.emit(RecitationEvent::SessionStarted {
            session: session.clone(),
        });
        Ok(session)
    }

    /// Score an utterance against the verse in focus and fold it into the
    /// open session. Fails without side effects when no session is open.
    ///
    /// A verse with no loaded text scores as absent and is not counted.
    pub async fn submit_utterance(&self, recited_text: &str) -> Result<ValidationResult> {
        let auto_advance = self.settings.get().auto_advance;
        let mut pending = Vec::new();

        let result = {
            let mut state = self.state.lock().await;
            if !state.aggregator.is_open() {
                return Err(SessionError::NoOpenSession.into());
            }
            let reference = state.current_verse;
            let Some(verse) = self.corpus.verse(reference) else {
                log_warn!("No text for verse {}, utterance not counted", reference);
                return Ok(ValidationResult::absent());
            };
            let result = self.validator.validate_verse(&verse, recited_text);

            state.aggregator.record_verse_completion(&result)?;
            pending.push(RecitationEvent::VerseValidated {
                reference,
                result: result.clone(),
                chapter_progress: self.corpus.chapter_progress(reference),
            });

            if result.is_valid {
                if self.corpus.is_last_verse(reference) {
                    state.aggregator.record_chapter_completion(reference.chapter)?;
                    pending.push(RecitationEvent::ChapterCompleted {
                        chapter: reference.chapter,
                    });
                }
                if auto_advance {
                    if let Some(next) = self.corpus.next_recitable_verse(reference) {
                        state.current_verse = next;
                        pending.push(RecitationEvent::VerseChanged { reference: next });
                    }
                }
            }
            result
        };

        for event in pending {
            self.emit(event);
        }
        Ok(result)
    }

    pub async fn handle_audio_event(&self, event: AudioEvent) -> Result<()> {
        match event {
            AudioEvent::PauseDetected => {
                let pauses_detected = {
                    let mut state = self.state.lock().await;
                    state.aggregator.record_pause()?;
                    state
                        .aggregator
                        .current()
                        .map(|s| s.pauses_detected)
                        .unwrap_or_default()
                };
                self.emit(RecitationEvent::PauseRecorded { pauses_detected });
            }
            AudioEvent::WakeWordDetected => {
                if !self.settings.get().wake_word_enabled {
                    log_debug!("Wake word ignored: disabled in settings");
                } else if self.is_session_open().await {
                    log_debug!("Wake word ignored: session already open");
                } else {
                    self.start_session().await?;
                }
            }
        }
        Ok(())
    }

    /// Close the open session, add it to history and persist it.
    ///
    /// The in-memory history keeps the session even if the store write fails;
    /// the error is still returned.
    pub async fn end_session(&self) -> Result<Session> {
        let closed = {
            let mut state = self.state.lock().await;
            let closed = state.aggregator.end_session(Utc::now())?;
            state.history.push(closed.clone())?;
            closed
        };

        log_info!(
            "Session {} ended: {} verses, {:.1}% average accuracy",
            closed.id,
            closed.verses_recited,
            closed.average_accuracy
        );
        self.emit(RecitationEvent::SessionEnded {
            session: closed.clone(),
        });

        if let Err(err) = self.db.insert_closed_session(&closed).await {
            log_error!("Failed to persist session {}: {err:#}", closed.id);
            return Err(err);
        }
        Ok(closed)
    }

    pub async fn history(&self) -> SessionHistory {
        self.state.lock().await.history.clone()
    }

    pub async fn stats(&self, window_days: Option<u32>) -> Stats {
        let state = self.state.lock().await;
        compute_stats(state.history.sessions(), window_days, Utc::now())
    }

    pub async fn achievements(&self) -> Vec<Achievement> {
        compute_achievements(&self.stats(None).await)
    }

    fn emit(&self, event: RecitationEvent) {
        // No subscribers is fine; the host may not be listening yet.
        let _ = self.events.send(event);
    }
}
