//! Finished-session summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a finished session, ready for a `ScoreReporter`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Non-empty player name.
    pub player_id: String,
    /// `moves - lives_lost`, which equals the number of pairs found.
    pub score: i64,
    /// Seconds between the end of the reveal window and the end of play.
    pub elapsed_seconds: f64,
    pub reported_at: DateTime<Utc>,
}
