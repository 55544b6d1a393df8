//! Card types.
//!
//! - `ImageRef`: what a card shows when face-up
//! - `SlotId`: stable identity of a card within one deck
//! - `Card`: slot state (flipped, matched)

pub mod card;

pub use card::{Card, ImageRef, SlotId};
