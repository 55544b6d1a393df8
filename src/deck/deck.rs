//! The deck: an ordered sequence of cards.
//!
//! ## Invariants
//!
//! - every `ImageRef` appears exactly `copies_per_image` times
//! - no two cards share a `SlotId`
//!
//! Cards live in an `im::Vector` so snapshots clone in O(1).

use im::Vector;
use rustc_hash::FxHashMap;

use super::builder::slot_for;
use crate::cards::{Card, ImageRef, SlotId};
use crate::core::{GameError, GameResult};

/// An ordered, validated sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
    copies_per_image: usize,
}

impl Deck {
    /// Build a deck whose table order is exactly `images`.
    ///
    /// Slot IDs follow the given order. Useful for replaying a known
    /// layout; regular play goes through `DeckBuilder`.
    ///
    /// ```
    /// use memory_match::deck::Deck;
    ///
    /// let deck = Deck::from_image_order(["A", "B", "A", "B"], 2).unwrap();
    /// assert_eq!(deck.len(), 4);
    /// assert_eq!(deck.distinct_images(), 2);
    /// ```
    pub fn from_image_order<I, T>(images: I, copies_per_image: usize) -> GameResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageRef>,
    {
        let cards: Vector<Card> = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| Ok(Card::new(image.into(), slot_for(index)?)))
            .collect::<GameResult<_>>()?;

        if cards.is_empty() {
            return Err(GameError::InsufficientImages);
        }
        if copies_per_image < 2 || copies_per_image % 2 != 0 {
            return Err(GameError::InvalidConfig(
                "copies_per_image must be an even number of at least 2".into(),
            ));
        }

        let mut counts: FxHashMap<&ImageRef, usize> = FxHashMap::default();
        for card in &cards {
            *counts.entry(&card.image_ref).or_default() += 1;
        }
        if let Some((image, count)) = counts.iter().find(|(_, &n)| n != copies_per_image) {
            return Err(GameError::InvalidConfig(format!(
                "image {image} appears {count} times, expected {copies_per_image}"
            )));
        }

        Ok(Self::from_cards_unchecked(cards, copies_per_image))
    }

    /// Wrap cards that are already known to satisfy the deck invariants.
    pub(crate) fn from_cards_unchecked(cards: Vector<Card>, copies_per_image: usize) -> Self {
        Self {
            cards,
            copies_per_image,
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards per image.
    #[must_use]
    pub fn copies_per_image(&self) -> usize {
        self.copies_per_image
    }

    /// Number of distinct images (pairs, for two copies).
    #[must_use]
    pub fn distinct_images(&self) -> usize {
        self.cards.len() / self.copies_per_image
    }

    /// Iterate cards in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Table position of a slot.
    #[must_use]
    pub fn position(&self, slot: SlotId) -> Option<usize> {
        self.cards.iter().position(|card| card.slot_id == slot)
    }

    /// Look up a card by slot.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Card> {
        self.position(slot).and_then(|index| self.cards.get(index))
    }

    /// Mutable lookup by slot.
    pub(crate) fn get_mut(&mut self, slot: SlotId) -> Option<&mut Card> {
        let index = self.position(slot)?;
        self.cards.get_mut(index)
    }

    /// Apply `f` to every card.
    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(&mut Card)) {
        for card in self.cards.iter_mut() {
            f(card);
        }
    }

    /// Whether every card has been matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.matched).count()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
