pub mod clock;
pub mod config;
pub mod error;
pub mod stats;
pub mod types;

pub use clock::GameClock;
pub use error::{GameError, Result};
