//! Game sessions: the flip/match state machine and what it exposes.
//!
//! ## Key Types
//!
//! - `GameSession`: owns the deck, lives, moves, timing and phase
//! - `Phase` / `GameStatus`: lifecycle position and outcome
//! - `TimerTicket` / `TimerRequest` / `TimerQueue`: cooperative timers
//!   tagged with the session generation
//! - `SessionSnapshot`: read-only renderable copy
//! - `SessionEvent`: incremental change log
//! - `ScoreSummary`: finished-game record for reporting

pub mod event;
pub mod game;
pub mod phase;
pub mod score;
pub mod snapshot;
pub mod timer;

pub use event::SessionEvent;
pub use game::{FlipOutcome, GameSession};
pub use phase::{GameStatus, Phase};
pub use score::ScoreSummary;
pub use snapshot::{CardView, SessionSnapshot};
pub use timer::{TimerKind, TimerQueue, TimerRequest, TimerTicket};
