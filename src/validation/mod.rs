//! Recitation scoring: diacritic normalization, word similarity and the
//! positional verse validator.

pub mod config;
pub mod normalize;
pub mod similarity;
pub mod types;
pub mod validator;

pub use config::ValidationThresholds;
pub use normalize::normalize;
pub use similarity::similarity;
pub use types::{Mistake, MistakeKind, Severity, ValidationResult};
pub use validator::{validate_words, RecitationValidator};
