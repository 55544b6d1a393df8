//! Deck construction: duplicate, number, shuffle.
//!
//! ```
//! use memory_match::cards::ImageRef;
//! use memory_match::core::GameRng;
//! use memory_match::deck::DeckBuilder;
//!
//! let images = vec![ImageRef::new("a"), ImageRef::new("b"), ImageRef::new("c")];
//! let mut rng = GameRng::new(7);
//!
//! let deck = DeckBuilder::new().build(&images, &mut rng).unwrap();
//! assert_eq!(deck.len(), 6);
//! ```

use im::Vector;
use rustc_hash::FxHashSet;

use super::deck::Deck;
use crate::cards::{Card, ImageRef, SlotId};
use crate::core::{GameError, GameResult, GameRng};

/// Builds shuffled decks from image references.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckBuilder {
    copies_per_image: usize,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self {
            copies_per_image: 2,
        }
    }
}

impl DeckBuilder {
    /// Builder producing pairs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder producing `copies` cards per image.
    ///
    /// Cards are matched two at a time, so `copies` must be even.
    pub fn with_copies(copies: usize) -> Self {
        assert!(
            copies >= 2 && copies % 2 == 0,
            "A deck needs an even number of at least 2 copies per image"
        );
        Self {
            copies_per_image: copies,
        }
    }

    /// Cards per image.
    #[must_use]
    pub fn copies_per_image(&self) -> usize {
        self.copies_per_image
    }

    /// Build a shuffled deck.
    ///
    /// Each distinct image is laid out `copies_per_image` times and every
    /// card gets a `SlotId` equal to its position before the shuffle.
    /// Repeated references in `images` are collapsed to their first
    /// occurrence so each image still appears exactly `copies_per_image`
    /// times.
    pub fn build(&self, images: &[ImageRef], rng: &mut GameRng) -> GameResult<Deck> {
        let mut seen = FxHashSet::default();
        let distinct: Vec<&ImageRef> = images.iter().filter(|image| seen.insert(*image)).collect();

        if distinct.is_empty() {
            return Err(GameError::InsufficientImages);
        }
        if distinct.len() < images.len() {
            tracing::debug!(
                dropped = images.len() - distinct.len(),
                "Collapsed duplicate image references"
            );
        }

        let mut cards: Vec<Card> = (0..self.copies_per_image)
            .flat_map(|_| distinct.iter().copied())
            .enumerate()
            .map(|(index, image)| Ok(Card::new(image.clone(), slot_for(index)?)))
            .collect::<GameResult<_>>()?;

        rng.shuffle(&mut cards);

        Ok(Deck::from_cards_unchecked(
            Vector::from(cards),
            self.copies_per_image,
        ))
    }
}

/// Slot for the card at `index`, failing if it does not fit a `SlotId`.
pub(crate) fn slot_for(index: usize) -> GameResult<SlotId> {
    u32::try_from(index)
        .map(SlotId::new)
        .map_err(|_| GameError::InvalidConfig(format!("deck position {index} exceeds slot range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::new(n)).collect()
    }

    #[test]
    fn test_build_pairs() {
        let mut rng = GameRng::new(42);
        let deck = DeckBuilder::new()
            .build(&images(&["a", "b", "c", "d"]), &mut rng)
            .unwrap();

        assert_eq!(deck.len(), 8);
        assert_eq!(deck.distinct_images(), 4);
        for name in ["a", "b", "c", "d"] {
            assert_eq!(deck.iter().filter(|c| c.image_ref.as_str() == name).count(), 2);
        }
    }

    #[test]
    fn test_build_empty_fails() {
        let mut rng = GameRng::new(42);
        let result = DeckBuilder::new().build(&[], &mut rng);
        assert_eq!(result, Err(GameError::InsufficientImages));
    }

    #[test]
    fn test_slot_ids_follow_pre_shuffle_layout() {
        let mut rng = GameRng::new(42);
        let deck = DeckBuilder::new()
            .build(&images(&["a", "b", "c"]), &mut rng)
            .unwrap();

        // Pre-shuffle layout is a b c a b c, so slot n shows image n % 3.
        for card in &deck {
            let expected = ["a", "b", "c"][card.slot_id.raw() as usize % 3];
            assert_eq!(card.image_ref.as_str(), expected);
        }
    }

    #[test]
    fn test_seeded_build_is_deterministic() {
        let imgs = images(&["a", "b", "c", "d", "e"]);
        let deck1 = DeckBuilder::new().build(&imgs, &mut GameRng::new(9)).unwrap();
        let deck2 = DeckBuilder::new().build(&imgs, &mut GameRng::new(9)).unwrap();

        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_duplicate_inputs_collapsed() {
        let mut rng = GameRng::new(1);
        let deck = DeckBuilder::new()
            .build(&images(&["a", "a", "b"]), &mut rng)
            .unwrap();

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.distinct_images(), 2);
    }

    #[test]
    fn test_quadruples() {
        let mut rng = GameRng::new(3);
        let deck = DeckBuilder::with_copies(4)
            .build(&images(&["a", "b"]), &mut rng)
            .unwrap();

        assert_eq!(deck.len(), 8);
        assert_eq!(deck.copies_per_image(), 4);
    }

    #[test]
    #[should_panic(expected = "even number of at least 2 copies")]
    fn test_odd_copies_rejected() {
        DeckBuilder::with_copies(3);
    }

    #[test]
    #[should_panic(expected = "even number of at least 2 copies")]
    fn test_single_copy_rejected() {
        DeckBuilder::with_copies(1);
    }

    #[test]
    fn test_slot_for_range() {
        assert_eq!(slot_for(7), Ok(SlotId::new(7)));
        assert_eq!(slot_for(u32::MAX as usize), Ok(SlotId::new(u32::MAX)));
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            slot_for(u32::MAX as usize + 1),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
