//! Live recitation: the controller that owns the open session, the speech
//! collaborator seam and the polling loop that connects them.

pub mod controller;
pub mod listener;
pub mod speech;

pub use controller::{RecitationController, RecitationEvent, RecitationSnapshot};
pub use listener::{ListeningLoop, POLL_INTERVAL};
pub use speech::{AudioEvent, RecognizerOutput, SimulatedRecognizer, SimulationConfig, SpeechRecognizer};
