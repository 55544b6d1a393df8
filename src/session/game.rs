//! The game session state machine.
//!
//! `GameSession` owns one deck and everything that changes while it is
//! played: the face-up selection, lives, moves, timestamps and phase.
//!
//! ## Flow
//!
//! 1. `start(images)` deals a deck face-up and queues a `Reveal` timer.
//! 2. The host fires the timer; cards turn face-down and play begins.
//! 3. `flip(slot)` twice makes an attempt. The second flip locks input,
//!    scores the attempt and queues a `Resolve` timer.
//! 4. Firing `Resolve` turns mismatched cards back and unlocks input.
//!
//! ## Generations
//!
//! Each start or restart bumps `generation`. Timer tickets carry the
//! generation they were issued for and `fire_timer` drops any ticket from
//! an older one.
//!
//! ## Invariants
//!
//! Outside the reveal window a card is `flipped` iff it is in the
//! face-up selection or `matched`. `lives == 0` implies `Lost`; every card
//! matched implies `Won`.

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use super::event::SessionEvent;
use super::phase::{GameStatus, Phase};
use super::score::ScoreSummary;
use super::snapshot::{CardView, SessionSnapshot};
use super::timer::{TimerKind, TimerRequest, TimerTicket};
use crate::cards::{ImageRef, SlotId};
use crate::core::{Clock, GameError, GameResult, GameRng, SessionConfig, SystemClock};
use crate::deck::{Deck, DeckBuilder};

/// Result of a `flip` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed: wrong phase, input locked, or card already up.
    Ignored,
    /// First card of an attempt.
    First,
    /// Second card completed a pair.
    Match,
    /// Second card did not match the first.
    Mismatch,
}

/// A single player's memory-match session.
pub struct GameSession {
    config: SessionConfig,
    builder: DeckBuilder,
    rng: GameRng,
    clock: Box<dyn Clock>,

    phase: Phase,
    deck: Option<Deck>,
    flipped: SmallVec<[SlotId; 2]>,
    input_locked: bool,
    lives: u32,
    move_count: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,

    generation: u64,
    timers: Vec<TimerRequest>,
    events: Vec<SessionEvent>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("generation", &self.generation)
            .field("phase", &self.phase)
            .field("lives", &self.lives)
            .field("move_count", &self.move_count)
            .field("flipped", &self.flipped)
            .field("input_locked", &self.input_locked)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Create a session in `Loading` using the system clock.
    ///
    /// Decks are shuffled from a stream derived from `seed`.
    pub fn new(config: SessionConfig, seed: u64) -> GameResult<Self> {
        config.validate()?;

        Ok(Self {
            builder: DeckBuilder::with_copies(config.copies_per_image),
            rng: GameRng::new(seed).for_context("deck"),
            clock: Box::new(SystemClock),
            phase: Phase::Loading,
            deck: None,
            flipped: SmallVec::new(),
            input_locked: false,
            lives: config.total_lives,
            move_count: 0,
            started_at: None,
            ended_at: None,
            generation: 0,
            timers: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.phase.status()
    }

    /// The current deck; `None` while loading.
    #[must_use]
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    /// Face-up, unresolved slots in flip order.
    #[must_use]
    pub fn flipped_slot_ids(&self) -> &[SlotId] {
        &self.flipped
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn total_lives(&self) -> u32 {
        self.config.total_lives
    }

    #[must_use]
    pub fn lives_lost(&self) -> u32 {
        self.config.total_lives - self.lives
    }

    /// Completed two-card attempts.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Pairs (or groups) found so far.
    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.deck
            .as_ref()
            .map_or(0, |deck| deck.matched_count() / 2)
    }

    /// Pairs in the deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.as_ref().map_or(0, |deck| deck.len() / 2)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Incremented on every start and restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // === Lifecycle ===

    /// Deal a deck from `images` and open the reveal window.
    ///
    /// On `EmptyPhotoSupply` nothing changes; the caller may retry once
    /// the supply delivers.
    pub fn start(&mut self, images: &[ImageRef]) -> GameResult<()> {
        let deck = self.build_deck(images)?;
        self.deal(deck);
        Ok(())
    }

    /// Start with a deck built elsewhere (replays, fixed layouts).
    ///
    /// The deck must use this session's `copies_per_image`; otherwise
    /// `InvalidConfig` is returned and nothing changes.
    pub fn start_with_deck(&mut self, deck: Deck) -> GameResult<()> {
        if deck.copies_per_image() != self.config.copies_per_image {
            return Err(GameError::InvalidConfig(format!(
                "deck has {} copies per image, session expects {}",
                deck.copies_per_image(),
                self.config.copies_per_image
            )));
        }
        self.deal(deck);
        Ok(())
    }

    /// Throw the current game away and deal a new one.
    ///
    /// Pending timers from the old game become stale. If `images` is empty
    /// the session is left in `Loading` and `EmptyPhotoSupply` is returned.
    pub fn restart(&mut self, images: &[ImageRef]) -> GameResult<()> {
        tracing::info!(generation = self.generation, "Restarting session");
        match self.build_deck(images) {
            Ok(deck) => {
                self.deal(deck);
                Ok(())
            }
            Err(err) => {
                self.reset(Phase::Loading);
                self.deck = None;
                Err(err)
            }
        }
    }

    fn build_deck(&mut self, images: &[ImageRef]) -> GameResult<Deck> {
        self.builder
            .build(images, &mut self.rng)
            .map_err(|err| match err {
                GameError::InsufficientImages => GameError::EmptyPhotoSupply,
                other => other,
            })
    }

    fn reset(&mut self, phase: Phase) {
        self.generation += 1;
        self.phase = phase;
        self.flipped.clear();
        self.input_locked = false;
        self.lives = self.config.total_lives;
        self.move_count = 0;
        self.started_at = None;
        self.ended_at = None;
        self.timers.clear();
        self.events.clear();
    }

    fn deal(&mut self, mut deck: Deck) {
        self.reset(Phase::Reveal);
        deck.for_each_mut(|card| {
            card.matched = false;
            card.flipped = true;
        });
        let card_count = deck.len();
        self.deck = Some(deck);
        self.input_locked = true;

        tracing::info!(generation = self.generation, cards = card_count, "Session started");
        self.events.push(SessionEvent::Started {
            generation: self.generation,
            card_count,
        });
        self.schedule(TimerKind::Reveal, self.config.reveal_window);
    }

    // === Timers ===

    fn schedule(&mut self, kind: TimerKind, delay: std::time::Duration) {
        self.timers.push(TimerRequest {
            ticket: TimerTicket {
                generation: self.generation,
                kind,
            },
            delay,
        });
    }

    /// Take the timer requests queued since the last call.
    pub fn take_timer_requests(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.timers)
    }

    /// Run the callback for `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket belongs to an
    /// earlier generation.
    pub fn fire_timer(&mut self, ticket: TimerTicket) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                kind = ?ticket.kind,
                "Ignoring stale timer"
            );
            return false;
        }

        match ticket.kind {
            TimerKind::Reveal => self.on_reveal_timer_elapsed(),
            TimerKind::Resolve => self.on_resolve_timer_elapsed(),
        }
        true
    }

    /// End the reveal window. No-op outside `Reveal`.
    pub fn on_reveal_timer_elapsed(&mut self) {
        if self.phase != Phase::Reveal {
            tracing::debug!(phase = ?self.phase, "Reveal timer outside reveal window");
            return;
        }
        if let Some(deck) = self.deck.as_mut() {
            deck.for_each_mut(|card| {
                if !card.matched {
                    card.flipped = false;
                }
            });
        }
        self.started_at = Some(self.clock.now());
        self.phase = Phase::Playing;
        self.input_locked = false;

        tracing::debug!(generation = self.generation, "Reveal window closed");
        self.events.push(SessionEvent::Revealed);
    }

    /// Reconcile the pending attempt. No-op unless `Playing` with an
    /// attempt waiting.
    pub fn on_resolve_timer_elapsed(&mut self) {
        if self.phase != Phase::Playing || !self.input_locked {
            return;
        }
        if let Some(deck) = self.deck.as_mut() {
            for slot in &self.flipped {
                if let Some(card) = deck.get_mut(*slot) {
                    if !card.matched {
                        card.flipped = false;
                    }
                }
            }
        }
        self.flipped.clear();
        self.input_locked = false;

        tracing::debug!(generation = self.generation, "Attempt resolved");
        self.events.push(SessionEvent::Resolved);
    }

    // === Play ===

    /// Turn a card face-up.
    ///
    /// Fails with `UnknownSlot` when `slot` is not in the deck (including
    /// while loading). Silently ignored outside `Playing`, while input is
    /// locked, or when the card is matched or already face-up.
    pub fn flip(&mut self, slot: SlotId) -> GameResult<FlipOutcome> {
        let deck = self.deck.as_mut().ok_or(GameError::UnknownSlot(slot))?;
        let card = deck.get_mut(slot).ok_or(GameError::UnknownSlot(slot))?;

        if self.phase != Phase::Playing || self.input_locked {
            return Ok(FlipOutcome::Ignored);
        }
        if card.matched || self.flipped.contains(&slot) {
            return Ok(FlipOutcome::Ignored);
        }

        card.flipped = true;
        self.flipped.push(slot);
        tracing::debug!(%slot, selected = self.flipped.len(), "Card flipped");
        self.events.push(SessionEvent::Flipped { slot });

        if self.flipped.len() < 2 {
            return Ok(FlipOutcome::First);
        }

        self.move_count += 1;
        self.input_locked = true;
        let (first, second) = (self.flipped[0], self.flipped[1]);

        let is_match = match (deck.get(first), deck.get(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        let outcome = if is_match {
            for id in [first, second] {
                if let Some(card) = deck.get_mut(id) {
                    card.matched = true;
                }
            }
            let all_matched = deck.all_matched();
            self.events.push(SessionEvent::Matched { first, second });
            if all_matched {
                self.finish(Phase::Won);
            }
            FlipOutcome::Match
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.events.push(SessionEvent::Mismatched {
                first,
                second,
                lives: self.lives,
            });
            if self.lives == 0 {
                self.finish(Phase::Lost);
            }
            FlipOutcome::Mismatch
        };

        tracing::debug!(
            moves = self.move_count,
            lives = self.lives,
            ?outcome,
            "Attempt scored"
        );
        self.schedule(TimerKind::Resolve, self.config.resolve_delay);
        Ok(outcome)
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.ended_at = Some(self.clock.now());

        let moves = self.move_count;
        match phase {
            Phase::Won => {
                tracing::info!(moves, lives = self.lives, "Session won");
                self.events.push(SessionEvent::Won { moves });
            }
            Phase::Lost => {
                tracing::info!(moves, "Session lost");
                self.events.push(SessionEvent::Lost { moves });
            }
            _ => {}
        }
    }

    // === Timing and scoring ===

    /// Seconds of play, `0.0` until both timestamps are recorded.
    ///
    /// Fails with `InvalidTimeRange` if the end precedes the start.
    pub fn compute_elapsed_seconds(&self) -> GameResult<f64> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => (end - start)
                .to_std()
                .map(|elapsed| elapsed.as_secs_f64())
                .map_err(|_| GameError::InvalidTimeRange),
            _ => Ok(0.0),
        }
    }

    /// `compute_elapsed_seconds`, clamped to zero on clock skew.
    #[must_use]
    pub fn elapsed_seconds_clamped(&self) -> f64 {
        self.compute_elapsed_seconds().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Clamping elapsed time to zero");
            0.0
        })
    }

    /// Score for the current session: `moves - lives_lost`.
    #[must_use]
    pub fn score(&self) -> i64 {
        i64::from(self.move_count) - i64::from(self.lives_lost())
    }

    /// Summary of a finished session.
    pub fn current_score_summary(&self, player_id: &str) -> GameResult<ScoreSummary> {
        if !self.phase.is_finished() {
            return Err(GameError::GameNotFinished);
        }
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(GameError::InvalidPlayerId);
        }

        Ok(ScoreSummary {
            player_id: player_id.to_string(),
            score: self.score(),
            elapsed_seconds: self.elapsed_seconds_clamped(),
            reported_at: self.clock.now(),
        })
    }

    // === Presentation ===

    /// Renderable copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            phase: self.phase,
            status: self.status(),
            cards: self
                .deck
                .iter()
                .flat_map(|deck| deck.iter())
                .map(CardView::from)
                .collect(),
            flipped_slot_ids: self.flipped.to_vec(),
            input_locked: self.input_locked,
            lives: self.lives,
            total_lives: self.config.total_lives,
            move_count: self.move_count,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }

    /// Take the events recorded since the last call.
    ///
    /// The log only covers the current game; starting or restarting
    /// discards anything left undrained.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
