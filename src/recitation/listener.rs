use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::controller::RecitationController;
use super::speech::{RecognizerOutput, SpeechRecognizer};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Default gap between recognizer polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Background task that polls a recognizer and feeds the controller.
pub struct ListeningLoop {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl Default for ListeningLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl ListeningLoop {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(
        &mut self,
        controller: RecitationController,
        recognizer: Box<dyn SpeechRecognizer>,
        interval: Duration,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("listening loop already running");
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(listening_loop(
            controller,
            recognizer,
            interval,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("listening loop task failed to join")
        } else {
            Ok(())
        }
    }
}

async fn listening_loop(
    controller: RecitationController,
    mut recognizer: Box<dyn SpeechRecognizer>,
    interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let expected = controller.expected_verse().await;
                if let Some(output) = recognizer.poll(expected.as_ref()) {
                    deliver(&controller, output).await;
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("listening loop shutting down");
                break;
            }
        }
    }
}

async fn deliver(controller: &RecitationController, output: RecognizerOutput) {
    match output {
        RecognizerOutput::Utterance(text) => {
            if !controller.is_session_open().await {
                log_warn!("discarding utterance received with no open session");
                return;
            }
            match controller.submit_utterance(&text).await {
                Ok(result) => log_debug!(
                    "utterance scored {:.1}% ({} mistakes)",
                    result.accuracy_percent,
                    result.mistakes.len()
                ),
                Err(err) => log_warn!("discarding utterance: {err:#}"),
            }
        }
        RecognizerOutput::Event(event) => {
            if let Err(err) = controller.handle_audio_event(event).await {
                log_warn!("ignoring {event:?}: {err:#}");
            }
        }
    }
}
