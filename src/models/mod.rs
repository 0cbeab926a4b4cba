pub mod session;
pub mod stats;

pub use session::Session;
pub use stats::{Achievement, Stats};
