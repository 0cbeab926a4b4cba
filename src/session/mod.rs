//! Session lifecycle, history and statistics.

pub mod history;
pub mod state;
pub mod stats;

pub use history::{SessionHistory, MAX_HISTORY};
pub use state::{SessionAggregator, SessionError, SessionState};
pub use stats::{compute_achievements, compute_stats, streak_days};
