//! Session events.
//!
//! Every state change appends an event. Renderers that prefer
//! incremental updates drain them; others just re-read the snapshot.

use serde::{Deserialize, Serialize};

use crate::cards::SlotId;

/// Something that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A deck was dealt and the reveal window opened.
    Started { generation: u64, card_count: usize },
    /// The reveal window closed; play begins.
    Revealed,
    /// A card was turned face-up.
    Flipped { slot: SlotId },
    /// Two flipped cards formed a pair.
    Matched { first: SlotId, second: SlotId },
    /// Two flipped cards did not match; a life was lost.
    Mismatched {
        first: SlotId,
        second: SlotId,
        lives: u32,
    },
    /// The pending attempt was reconciled and input reopened.
    Resolved,
    /// Every pair found.
    Won { moves: u32 },
    /// No lives left.
    Lost { moves: u32 },
}
