//! Decks and deck construction.

#[allow(clippy::module_inception)]
pub mod deck;
pub mod builder;

pub use builder::DeckBuilder;
pub use deck::Deck;
