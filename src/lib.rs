//! # memory-match
//!
//! Session engine for a photo memory-matching game.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: decks are shuffled through a seeded `GameRng`
//!    and time comes from an injected `Clock`, so any game replays exactly.
//!
//! 2. **No hidden timers**: the session never sleeps or spawns. Delayed
//!    work is handed to the host as generation-tagged `TimerTicket`s, and
//!    tickets from a previous game are ignored.
//!
//! 3. **Collaborators at the edges**: photos, score reporting and the
//!    leaderboard sit behind traits; the session core has no I/O.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, clock, errors
//! - `cards`: image references, slot IDs, cards
//! - `deck`: decks and the shuffling `DeckBuilder`
//! - `session`: the `GameSession` state machine, timers, snapshots, events
//! - `supply`: `PhotoSupply` and catalogue-backed supplies
//! - `leaderboard`: `ScoreReporter`, `LeaderboardSource`, ranking
//! - `controller`: command dispatch for a presentation layer

pub mod core;
pub mod cards;
pub mod deck;
pub mod session;
pub mod supply;
pub mod leaderboard;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    GameRng, SessionConfig,
    GameError, GameResult,
};

pub use crate::cards::{Card, ImageRef, SlotId};

pub use crate::deck::{Deck, DeckBuilder};

pub use crate::session::{
    GameSession, FlipOutcome, Phase, GameStatus,
    SessionSnapshot, CardView, SessionEvent, ScoreSummary,
    TimerKind, TimerTicket, TimerRequest, TimerQueue,
};

pub use crate::supply::{PhotoSupply, StaticPhotoSupply, AlbumPhotoSupply, Album, Photo};

pub use crate::leaderboard::{
    ScoreReporter, LeaderboardSource, LeaderboardEntry,
    InMemoryLeaderboard, rank_entries,
};

pub use crate::controller::{Command, ControllerResponse, GameController};
