//! Core engine types: RNG, configuration, time and errors.
//!
//! Nothing here knows about cards or sessions; the rest of the crate
//! builds on these.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use error::{GameError, GameResult};
pub use rng::GameRng;
