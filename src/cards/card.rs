//! Cards and their identifiers.
//!
//! A `Card` is one physical slot in a deck. Two cards may share an
//! `ImageRef` (that is what makes them a pair) but never a `SlotId`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Reference to an image (usually a URL) shown on a card face.
///
/// Backed by `Arc<str>` so duplicating an image into its pair is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    /// Create a new image reference.
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    /// Borrow the raw reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity of a card within a deck.
///
/// Assigned before the shuffle, so it says nothing about where the card
/// ends up on the table. Renderers key on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Image shown when the card is face-up.
    pub image_ref: ImageRef,

    /// Unique identity within the deck.
    pub slot_id: SlotId,

    /// Part of a found pair. Matched cards stay face-up.
    pub matched: bool,

    /// Currently face-up.
    pub flipped: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    pub fn new(image_ref: ImageRef, slot_id: SlotId) -> Self {
        Self {
            image_ref,
            slot_id,
            matched: false,
            flipped: false,
        }
    }

    /// Whether the card face is visible.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.flipped || self.matched
    }

    /// Whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.slot_id != other.slot_id && self.image_ref == other.image_ref
    }
}
