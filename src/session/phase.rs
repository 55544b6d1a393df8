//! Session phases and the coarse game status.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// ```text
/// Loading -> Reveal -> Playing -> Won
///                             \-> Lost
/// ```
///
/// `Won` and `Lost` are terminal until the session is restarted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No deck yet.
    #[default]
    Loading,
    /// Whole deck shown face-up for the preview window.
    Reveal,
    /// Accepting flips.
    Playing,
    /// Every card matched.
    Won,
    /// Out of lives.
    Lost,
}

impl Phase {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    /// Coarse status for scoring and display.
    #[must_use]
    pub fn status(self) -> GameStatus {
        match self {
            Phase::Loading | Phase::Reveal | Phase::Playing => GameStatus::Playing,
            Phase::Won => GameStatus::Won,
            Phase::Lost => GameStatus::Lost,
        }
    }
}

/// Outcome-level status of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Phase::Loading.status(), GameStatus::Playing);
        assert_eq!(Phase::Reveal.status(), GameStatus::Playing);
        assert_eq!(Phase::Playing.status(), GameStatus::Playing);
        assert_eq!(Phase::Won.status(), GameStatus::Won);
        assert_eq!(Phase::Lost.status(), GameStatus::Lost);
    }

    #[test]
    fn test_is_finished() {
        assert!(!Phase::Playing.is_finished());
        assert!(Phase::Won.is_finished());
        assert!(Phase::Lost.is_finished());
    }
}
