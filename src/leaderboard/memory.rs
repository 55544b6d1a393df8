//! In-memory leaderboard.

use std::sync::{Mutex, PoisonError};

use super::{rank_entries, LeaderboardEntry, LeaderboardSource, ScoreReporter};
use crate::core::{GameError, GameResult};
use crate::session::ScoreSummary;

/// Thread-safe in-memory results store.
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoreReporter for InMemoryLeaderboard {
    fn submit(&self, summary: &ScoreSummary) -> GameResult<()> {
        if summary.player_id.trim().is_empty() {
            return Err(GameError::InvalidPlayerId);
        }
        if !summary.elapsed_seconds.is_finite() || summary.elapsed_seconds < 0.0 {
            return Err(GameError::Report(format!(
                "elapsed_seconds out of range: {}",
                summary.elapsed_seconds
            )));
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(LeaderboardEntry::from(summary));
        rank_entries(&mut entries);

        tracing::info!(
            player = %summary.player_id,
            score = summary.score,
            elapsed = summary.elapsed_seconds,
            "Score recorded"
        );
        Ok(())
    }
}

impl LeaderboardSource for InMemoryLeaderboard {
    fn fetch_top(&self, limit: usize) -> GameResult<Vec<LeaderboardEntry>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn summary(player: &str, score: i64, elapsed: f64) -> ScoreSummary {
        ScoreSummary {
            player_id: player.into(),
            score,
            elapsed_seconds: elapsed,
            reported_at: Utc::now(),
        }
    }

    #[test]
    fn test_submit_and_fetch_ranked() {
        let board = InMemoryLeaderboard::new();
        board.submit(&summary("a", 3, 30.0)).unwrap();
        board.submit(&summary("b", 6, 50.0)).unwrap();
        board.submit(&summary("c", 6, 40.0)).unwrap();

        let top = board.fetch_top(2).unwrap();

        assert_eq!(board.len(), 3);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_id, "c");
        assert_eq!(top[1].player_id, "b");
    }

    #[test]
    fn test_submit_rejects_empty_player() {
        let board = InMemoryLeaderboard::new();
        assert_eq!(
            board.submit(&summary(" ", 1, 1.0)),
            Err(GameError::InvalidPlayerId)
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_submit_rejects_bad_elapsed() {
        let board = InMemoryLeaderboard::new();
        assert!(matches!(
            board.submit(&summary("a", 1, -1.0)),
            Err(GameError::Report(_))
        ));
        assert!(matches!(
            board.submit(&summary("a", 1, f64::NAN)),
            Err(GameError::Report(_))
        ));
    }
}
