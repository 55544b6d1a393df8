//! Presentation-facing controller.
//!
//! A renderer talks to the game through `Command`s and gets a fresh
//! `SessionSnapshot` (or collaborator result) back from every dispatch.
//! The controller owns the timer queue, so a host loop only needs to call
//! `advance` with the time that passed since the last frame.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::controller::{Command, GameController};
//! use memory_match::core::SessionConfig;
//! use memory_match::leaderboard::InMemoryLeaderboard;
//! use memory_match::session::Phase;
//! use memory_match::supply::StaticPhotoSupply;
//! use std::sync::Arc;
//!
//! let board = Arc::new(InMemoryLeaderboard::new());
//! let mut controller = GameController::new(
//!     SessionConfig::default(),
//!     7,
//!     StaticPhotoSupply::new(["a", "b", "c"]),
//!     board.clone(),
//!     board,
//! )
//! .unwrap();
//!
//! controller.dispatch(Command::Start).unwrap();
//! let snapshot = controller.advance(Duration::from_secs(3));
//! assert_eq!(snapshot.phase, Phase::Playing);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::{ImageRef, SlotId};
use crate::core::{Clock, GameError, GameResult, SessionConfig};
use crate::leaderboard::{LeaderboardEntry, LeaderboardSource, ScoreReporter};
use crate::session::{GameSession, ScoreSummary, SessionEvent, SessionSnapshot, TimerQueue};
use crate::supply::PhotoSupply;

/// Input forwarded from the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Fetch photos and deal a deck.
    Start,
    /// Flip a card.
    Flip { slot: SlotId },
    /// Fetch photos and deal a new deck, abandoning the current game.
    Restart,
    /// Report the finished game.
    SubmitScore { player_id: String },
    /// Fetch the leaderboard.
    ShowLeaderboard,
}

/// Result of a dispatched command.
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerResponse {
    Snapshot(SessionSnapshot),
    Submitted(ScoreSummary),
    Leaderboard(Vec<LeaderboardEntry>),
}

/// Wires a `GameSession` to its collaborators and a timer queue.
pub struct GameController<P, R, L> {
    session: GameSession,
    timers: TimerQueue,
    supply: P,
    reporter: R,
    leaderboard: L,
    leaderboard_limit: usize,
}

impl<P, R, L> GameController<P, R, L>
where
    P: PhotoSupply,
    R: ScoreReporter,
    L: LeaderboardSource,
{
    pub fn new(
        config: SessionConfig,
        seed: u64,
        supply: P,
        reporter: R,
        leaderboard: L,
    ) -> GameResult<Self> {
        Ok(Self {
            session: GameSession::new(config, seed)?,
            timers: TimerQueue::new(),
            supply,
            reporter,
            leaderboard,
            leaderboard_limit: 10,
        })
    }

    /// Replace the session clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.session = self.session.with_clock(clock);
        self
    }

    /// Number of entries `ShowLeaderboard` asks for.
    #[must_use]
    pub fn with_leaderboard_limit(mut self, limit: usize) -> Self {
        self.leaderboard_limit = limit;
        self
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Handle one command.
    pub fn dispatch(&mut self, command: Command) -> GameResult<ControllerResponse> {
        tracing::debug!(?command, "Dispatching command");
        match command {
            Command::Start => {
                let images = self.fetch_images()?;
                self.session.start(&images)?;
                Ok(self.sync())
            }
            Command::Restart => {
                let images = self.fetch_images()?;
                let result = self.session.restart(&images);
                self.timers.retain_generation(self.session.generation());
                let response = self.sync();
                result.map(|()| response)
            }
            Command::Flip { slot } => {
                self.session.flip(slot)?;
                Ok(self.sync())
            }
            Command::SubmitScore { player_id } => {
                let summary = self.session.current_score_summary(&player_id)?;
                self.reporter.submit(&summary).map_err(|err| {
                    tracing::warn!(error = %err, "Score submission failed");
                    err
                })?;
                Ok(ControllerResponse::Submitted(summary))
            }
            Command::ShowLeaderboard => {
                let entries = self
                    .leaderboard
                    .fetch_top(self.leaderboard_limit)
                    .map_err(|err| {
                        tracing::warn!(error = %err, "Leaderboard fetch failed");
                        err
                    })?;
                Ok(ControllerResponse::Leaderboard(entries))
            }
        }
    }

    /// Let `by` pass, firing every timer that comes due.
    pub fn advance(&mut self, by: Duration) -> SessionSnapshot {
        for ticket in self.timers.advance(by) {
            self.session.fire_timer(ticket);
            self.timers.schedule_all(self.session.take_timer_requests());
        }
        self.session.snapshot()
    }

    /// Fire timers until none are pending.
    pub fn settle(&mut self) -> SessionSnapshot {
        while let Some(wait) = self.timers.next_due() {
            self.advance(wait);
        }
        self.session.snapshot()
    }

    /// Events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session.drain_events()
    }

    fn fetch_images(&self) -> GameResult<Vec<ImageRef>> {
        let images = self
            .supply
            .fetch(self.session.config().max_images)
            .map_err(|err| {
                tracing::warn!(error = %err, "Photo supply failed");
                err
            })?;
        if images.is_empty() {
            tracing::warn!("Photo supply returned no images");
            return Err(GameError::EmptyPhotoSupply);
        }
        Ok(images)
    }

    fn sync(&mut self) -> ControllerResponse {
        self.timers.schedule_all(self.session.take_timer_requests());
        ControllerResponse::Snapshot(self.session.snapshot())
    }
}
