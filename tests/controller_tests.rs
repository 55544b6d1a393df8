//! End-to-end tests through `GameController`.
//!
//! Games are driven the way a presentation layer would: commands in,
//! snapshots out, time advanced between frames.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use memory_match::cards::SlotId;
use memory_match::controller::{Command, ControllerResponse, GameController};
use memory_match::core::{GameError, ManualClock, SessionConfig};
use memory_match::leaderboard::{InMemoryLeaderboard, LeaderboardEntry};
use memory_match::session::{GameStatus, Phase};
use memory_match::supply::{Album, AlbumPhotoSupply, Photo};

type Controller = GameController<AlbumPhotoSupply, Arc<InMemoryLeaderboard>, Arc<InMemoryLeaderboard>>;

fn catalogue() -> Vec<Album> {
    (1..=2u64)
        .rev()
        .map(|album_id| Album {
            album_id,
            photos: (0..3u64)
                .map(|n| {
                    let photo_id = album_id * 10 + n;
                    Photo {
                        photo_id,
                        album_id,
                        url: format!("https://photos/{photo_id}.jpg"),
                        title: format!("photo {photo_id}"),
                    }
                })
                .collect(),
        })
        .collect()
}

fn controller(config: SessionConfig, clock: &ManualClock, board: &Arc<InMemoryLeaderboard>) -> Controller {
    let supply = AlbumPhotoSupply::new(catalogue(), config.photos_per_album);
    GameController::new(config, 2024, supply, board.clone(), board.clone())
        .expect("valid config")
        .with_clock(clock.clone())
}

/// Slots grouped by image, in table order.
fn pairs(controller: &Controller) -> Vec<(SlotId, SlotId)> {
    let mut by_image: BTreeMap<String, Vec<SlotId>> = BTreeMap::new();
    for card in controller.session().deck().expect("dealt").iter() {
        by_image
            .entry(card.image_ref.to_string())
            .or_default()
            .push(card.slot_id);
    }
    by_image.into_values().map(|slots| (slots[0], slots[1])).collect()
}

fn flip(controller: &mut Controller, slot: SlotId) {
    controller
        .dispatch(Command::Flip { slot })
        .expect("known slot");
}

#[test]
fn test_full_game_to_leaderboard() {
    let clock = ManualClock::default();
    let board = Arc::new(InMemoryLeaderboard::new());
    let config = SessionConfig::new().with_photos_per_album(2);
    let mut controller = controller(config, &clock, &board);

    controller.dispatch(Command::Start).unwrap();
    assert_eq!(controller.session().deck().unwrap().len(), 8);
    assert_eq!(controller.advance(Duration::from_secs(3)).phase, Phase::Playing);

    let pairs = pairs(&controller);
    assert_eq!(pairs.len(), 4);

    // One mistake first: two cards from different pairs.
    flip(&mut controller, pairs[0].0);
    flip(&mut controller, pairs[1].0);
    let snapshot = controller.advance(Duration::from_secs(1));
    assert_eq!(snapshot.lives, 4);
    assert!(!snapshot.input_locked);

    for (first, second) in &pairs {
        clock.advance(ChronoDuration::seconds(5));
        flip(&mut controller, *first);
        flip(&mut controller, *second);
        controller.advance(Duration::from_secs(1));
    }

    let snapshot = controller.settle();
    assert_eq!(snapshot.status, GameStatus::Won);
    assert_eq!(snapshot.move_count, 5);

    let response = controller
        .dispatch(Command::SubmitScore {
            player_id: "grace".into(),
        })
        .unwrap();
    match response {
        ControllerResponse::Submitted(summary) => {
            assert_eq!(summary.score, 4);
            assert_eq!(summary.elapsed_seconds, 20.0);
        }
        other => panic!("expected submission, got {other:?}"),
    }

    let response = controller.dispatch(Command::ShowLeaderboard).unwrap();
    assert_eq!(
        response,
        ControllerResponse::Leaderboard(vec![LeaderboardEntry {
            player_id: "grace".into(),
            score: 4,
            elapsed_seconds: 20.0,
        }])
    );
}

#[test]
fn test_losing_game_is_reported() {
    let clock = ManualClock::default();
    let board = Arc::new(InMemoryLeaderboard::new());
    let config = SessionConfig::new().with_total_lives(1);
    let mut controller = controller(config, &clock, &board);

    controller.dispatch(Command::Start).unwrap();
    controller.settle();
    let pairs = pairs(&controller);

    flip(&mut controller, pairs[0].0);
    flip(&mut controller, pairs[1].1);

    assert_eq!(controller.session().status(), GameStatus::Lost);
    controller
        .dispatch(Command::SubmitScore {
            player_id: "linus".into(),
        })
        .unwrap();
    assert_eq!(board.len(), 1);
}

#[test]
fn test_restart_mid_attempt_ignores_old_timer() {
    let clock = ManualClock::default();
    let board = Arc::new(InMemoryLeaderboard::new());
    let mut controller = controller(SessionConfig::default(), &clock, &board);

    controller.dispatch(Command::Start).unwrap();
    controller.settle();
    let generation = controller.session().generation();
    let pairs = pairs(&controller);
    flip(&mut controller, pairs[0].0);
    flip(&mut controller, pairs[1].0);

    controller.dispatch(Command::Restart).unwrap();

    let snapshot = controller.advance(Duration::from_secs(1));
    assert_eq!(snapshot.generation, generation + 1);
    assert_eq!(snapshot.phase, Phase::Reveal);
    assert_eq!(snapshot.lives, 5);
    assert!(snapshot.cards.iter().all(|c| c.flipped));

    assert_eq!(controller.settle().phase, Phase::Playing);
}

#[test]
fn test_input_locked_until_resolution() {
    let clock = ManualClock::default();
    let board = Arc::new(InMemoryLeaderboard::new());
    let mut controller = controller(SessionConfig::default(), &clock, &board);

    controller.dispatch(Command::Start).unwrap();
    controller.settle();
    let pairs = pairs(&controller);
    flip(&mut controller, pairs[0].0);
    flip(&mut controller, pairs[1].0);

    // A third card cannot be revealed before the attempt resolves.
    flip(&mut controller, pairs[2].0);
    let snapshot = controller.advance(Duration::from_millis(999));
    assert!(snapshot.input_locked);
    assert!(!snapshot.card(pairs[2].0).unwrap().flipped);

    let snapshot = controller.advance(Duration::from_millis(1));
    assert!(!snapshot.input_locked);
    assert!(snapshot.flipped_slot_ids.is_empty());
}

#[test]
fn test_leaderboard_before_any_game() {
    let clock = ManualClock::default();
    let board = Arc::new(InMemoryLeaderboard::new());
    let mut controller = controller(SessionConfig::default(), &clock, &board);

    assert_eq!(
        controller.dispatch(Command::ShowLeaderboard),
        Ok(ControllerResponse::Leaderboard(Vec::new()))
    );
    assert_eq!(
        controller.dispatch(Command::SubmitScore {
            player_id: "early".into()
        }),
        Err(GameError::GameNotFinished)
    );
}
