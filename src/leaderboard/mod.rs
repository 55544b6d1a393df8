//! Score reporting and leaderboards.
//!
//! ## Ordering
//!
//! Leaderboards rank by score (highest first), then by elapsed time
//! (fastest first). `rank_entries` is the single definition of that order;
//! every `LeaderboardSource` is expected to return entries sorted by it.
//!
//! ## In-memory store
//!
//! `InMemoryLeaderboard` implements both collaborator traits for local
//! play and tests.

pub mod memory;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::GameResult;
use crate::session::ScoreSummary;

pub use memory::InMemoryLeaderboard;

/// Accepts finished-session summaries.
pub trait ScoreReporter {
    /// Submit a summary. Failures are returned, never retried.
    fn submit(&self, summary: &ScoreSummary) -> GameResult<()>;
}

/// Supplies ranked past results.
pub trait LeaderboardSource {
    /// Top `limit` entries in leaderboard order.
    fn fetch_top(&self, limit: usize) -> GameResult<Vec<LeaderboardEntry>>;
}

impl<T: ScoreReporter + ?Sized> ScoreReporter for Arc<T> {
    fn submit(&self, summary: &ScoreSummary) -> GameResult<()> {
        (**self).submit(summary)
    }
}

impl<T: LeaderboardSource + ?Sized> LeaderboardSource for Arc<T> {
    fn fetch_top(&self, limit: usize) -> GameResult<Vec<LeaderboardEntry>> {
        (**self).fetch_top(limit)
    }
}

/// One ranked result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub score: i64,
    pub elapsed_seconds: f64,
}

impl From<&ScoreSummary> for LeaderboardEntry {
    fn from(summary: &ScoreSummary) -> Self {
        Self {
            player_id: summary.player_id.clone(),
            score: summary.score,
            elapsed_seconds: summary.elapsed_seconds,
        }
    }
}

/// Leaderboard order: score descending, elapsed ascending.
pub fn leaderboard_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.elapsed_seconds.total_cmp(&b.elapsed_seconds))
}

/// Sort entries into leaderboard order (stable).
pub fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(leaderboard_order);
}
