//! Session configuration.
//!
//! Hosts configure a session at construction time:
//! - lives and deck shape (`total_lives`, `copies_per_image`)
//! - timer delays (`reveal_window`, `resolve_delay`)
//! - how many photos are pulled from a supply (`max_images`, `photos_per_album`)
//!
//! Durations serialize as whole milliseconds so configs stay readable as JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Configuration for a `GameSession`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives at the start of a session.
    pub total_lives: u32,

    /// Cards per distinct image (2 for classic pairs).
    pub copies_per_image: usize,

    /// How long the whole deck stays face-up before play begins.
    #[serde(with = "duration_ms")]
    pub reveal_window: Duration,

    /// Delay between the second flip of an attempt and its reconciliation.
    #[serde(with = "duration_ms")]
    pub resolve_delay: Duration,

    /// Photos taken from each album by `AlbumPhotoSupply`.
    pub photos_per_album: usize,

    /// Images requested from a photo supply per deck.
    pub max_images: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_lives: 5,
            copies_per_image: 2,
            reveal_window: Duration::from_secs(3),
            resolve_delay: Duration::from_millis(1000),
            photos_per_album: 5,
            max_images: 10,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting lives.
    #[must_use]
    pub fn with_total_lives(mut self, lives: u32) -> Self {
        self.total_lives = lives;
        self
    }

    /// Set the number of copies of each image.
    #[must_use]
    pub fn with_copies_per_image(mut self, copies: usize) -> Self {
        self.copies_per_image = copies;
        self
    }

    /// Set the reveal window.
    #[must_use]
    pub fn with_reveal_window(mut self, window: Duration) -> Self {
        self.reveal_window = window;
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    /// Set the per-album photo limit.
    #[must_use]
    pub fn with_photos_per_album(mut self, count: usize) -> Self {
        self.photos_per_album = count;
        self
    }

    /// Set how many images a deck asks the supply for.
    #[must_use]
    pub fn with_max_images(mut self, count: usize) -> Self {
        self.max_images = count;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> GameResult<()> {
        if self.total_lives == 0 {
            return Err(GameError::InvalidConfig(
                "total_lives must be at least 1".into(),
            ));
        }
        // Cards are matched two at a time, so an odd count leaves one unmatchable.
        if self.copies_per_image < 2 || self.copies_per_image % 2 != 0 {
            return Err(GameError::InvalidConfig(
                "copies_per_image must be an even number of at least 2".into(),
            ));
        }
        if self.max_images == 0 {
            return Err(GameError::InvalidConfig(
                "max_images must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
