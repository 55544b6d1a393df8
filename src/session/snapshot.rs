//! Read-only views of a session for renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{GameStatus, Phase};
use crate::cards::{Card, ImageRef, SlotId};

/// What a renderer may know about one card.
///
/// Face-down cards do not expose their image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub slot_id: SlotId,
    pub image_ref: Option<ImageRef>,
    pub flipped: bool,
    pub matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            slot_id: card.slot_id,
            image_ref: card.is_face_up().then(|| card.image_ref.clone()),
            flipped: card.flipped,
            matched: card.matched,
        }
    }
}

/// Point-in-time copy of a session's renderable state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub phase: Phase,
    pub status: GameStatus,
    /// Cards in table order.
    pub cards: Vec<CardView>,
    pub flipped_slot_ids: Vec<SlotId>,
    pub input_locked: bool,
    pub lives: u32,
    pub total_lives: u32,
    pub move_count: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Look up a card view by slot.
    #[must_use]
    pub fn card(&self, slot: SlotId) -> Option<&CardView> {
        self.cards.iter().find(|card| card.slot_id == slot)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.matched).count()
    }
}
