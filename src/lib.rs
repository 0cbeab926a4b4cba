pub mod corpus;
pub mod db;
pub mod models;
pub mod recitation;
pub mod session;
pub mod settings;
pub mod utils;
pub mod validation;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use log::{info, warn};

use corpus::{BundledCorpus, VerseCorpus};
use db::Database;
use recitation::{
    ListeningLoop, RecitationController, RecitationEvent, SimulatedRecognizer, SimulationConfig,
    POLL_INTERVAL,
};
use settings::SettingsStore;

const DEFAULT_DATA_DIR: &str = ".tilawa";
const DEFAULT_PRACTICE_SECS: u64 = 30;
const DEBUG_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Everything the app shell needs, built once at startup.
pub struct AppState {
    pub corpus: Arc<dyn VerseCorpus>,
    pub db: Database,
    pub settings: Arc<SettingsStore>,
    pub controller: RecitationController,
}

impl AppState {
    pub async fn build(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let corpus = BundledCorpus::load()?;
        corpus
            .verify_integrity()
            .context("bundled corpus failed integrity check")?;
        info!(
            "Loaded {} verses across {} chapters",
            corpus.len(),
            corpus.loaded_chapters().len()
        );
        let corpus: Arc<dyn VerseCorpus> = Arc::new(corpus);

        let db = Database::new(data_dir.join("tilawa.sqlite3"))?;
        let settings = Arc::new(SettingsStore::new(data_dir.join("settings.json"))?);
        let controller =
            RecitationController::new(corpus.clone(), db.clone(), settings.clone()).await?;

        Ok(Self {
            corpus,
            db,
            settings,
            controller,
        })
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn data_dir() -> PathBuf {
    std::env::var_os("TILAWA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn practice_duration() -> Duration {
    let secs = std::env::var("TILAWA_PRACTICE_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PRACTICE_SECS);
    Duration::from_secs(secs)
}

/// Run one simulated practice session and report the resulting statistics.
pub fn run() -> Result<()> {
    // Reads RUST_LOG, info by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Tilawa starting up...");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let state = AppState::build(data_dir()).await?;
        practice(&state).await
    })
}

async fn practice(state: &AppState) -> Result<()> {
    let poll_interval = if env_flag("TILAWA_DEBUG") {
        DEBUG_POLL_INTERVAL
    } else {
        POLL_INTERVAL
    };

    let mut events = state.controller.subscribe();
    let reporter = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RecitationEvent::VerseValidated {
                    reference, result, ..
                } => info!(
                    "{} -> {:.0}% ({})",
                    reference,
                    result.accuracy_percent,
                    if result.is_valid { "valid" } else { "retry" }
                ),
                RecitationEvent::ChapterCompleted { chapter } => {
                    info!("Chapter {} completed", chapter)
                }
                other => log::debug!("{other:?}"),
            }
        }
    });

    state.controller.start_session().await?;

    let mut listening = ListeningLoop::new();
    listening.start(
        state.controller.clone(),
        Box::new(SimulatedRecognizer::new(SimulationConfig::default())),
        poll_interval,
    )?;

    tokio::select! {
        _ = tokio::time::sleep(practice_duration()) => {}
        _ = tokio::signal::ctrl_c() => info!("Interrupted, ending session"),
    }

    listening.stop().await?;
    if let Err(err) = state.controller.end_session().await {
        warn!("Session ended with an error: {err:#}");
    }
    reporter.abort();

    let stats = state.controller.stats(None).await;
    info!(
        "All time: {} sessions, {} verses, {:.1}% average accuracy, {} day streak",
        stats.total_sessions, stats.total_verses_recited, stats.average_accuracy, stats.streak_days
    );
    for achievement in state.controller.achievements().await {
        info!("Achievement: {} - {}", achievement.title(), achievement.description());
    }

    Ok(())
}
