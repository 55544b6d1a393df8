//! Error types for the session engine.
//!
//! Every variant is a local validation failure the caller recovers from
//! (show a message, retry a fetch). None of them poison a session.

use thiserror::Error;

use crate::cards::SlotId;

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised by deck building, session operations and collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A deck was requested from an empty image list.
    #[error("cannot build a deck without images")]
    InsufficientImages,

    /// The photo supply produced nothing to build a deck from.
    #[error("photo supply returned no images")]
    EmptyPhotoSupply,

    /// The slot does not exist in the current deck.
    #[error("unknown slot: {0}")]
    UnknownSlot(SlotId),

    /// A score summary was requested before the session ended.
    #[error("game is not finished")]
    GameNotFinished,

    /// The recorded end time precedes the start time.
    #[error("end time precedes start time")]
    InvalidTimeRange,

    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Score summaries need a non-empty player id.
    #[error("player id must not be empty")]
    InvalidPlayerId,

    /// The photo supply failed (network, decoding, ...).
    #[error("photo supply failed: {0}")]
    Supply(String),

    /// The score reporter or leaderboard source failed.
    #[error("score reporting failed: {0}")]
    Report(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::UnknownSlot(SlotId::new(7)).to_string(),
            "unknown slot: Slot(7)"
        );
        assert_eq!(
            GameError::InvalidConfig("total_lives must be at least 1".into()).to_string(),
            "invalid configuration: total_lives must be at least 1"
        );
        assert_eq!(GameError::GameNotFinished.to_string(), "game is not finished");
    }
}
