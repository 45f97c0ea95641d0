//! Integration tests for the Practice session (public API).
//!
//! Stocks are given explicitly so every draw is known in advance.

use zshanten_core::{Navigation, PracticeSession, PracticeState};
use zshanten_engine::codec::tile_frequencies;
use zshanten_engine::{parse_tiles, AvailableTiles, Engine, Goal, TileKind, TileSetRule};

fn tiles(s: &str) -> Vec<TileKind> {
    parse_tiles(s).unwrap()
}

fn kind(s: &str) -> TileKind {
    s.parse().unwrap()
}

/// Ready after exactly one discard (7z), waiting on 3p.
const ONE_AWAY: &str = "123456789m12p55s7z";

#[test]
fn only_the_ready_discard_is_correct() {
    let engine = Engine::default();
    let mut session = PracticeSession::from_stock(&engine, tiles(ONE_AWAY), 3, tiles("3p1z2z")).unwrap();
    assert_eq!(session.state(), PracticeState::AwaitingDiscard);
    assert_eq!(session.best_kinds(), kind("7z").bit());

    assert_eq!(session.grade(kind("7z")), PracticeState::Correct);
    for k in tiles("123456789m12p5s") {
        assert_eq!(session.grade(k), PracticeState::Incorrect, "discarding {k}");
    }
}

#[test]
fn selection_protocol_marks_then_commits() {
    let engine = Engine::default();
    let mut session = PracticeSession::from_stock(&engine, tiles(ONE_AWAY), 3, tiles("3p1z2z")).unwrap();

    // A wrong mark can be changed before committing.
    assert!(session.select(0));
    assert_eq!(session.current().selected(), Some(0));
    assert_eq!(session.state(), PracticeState::Incorrect);

    assert!(session.select_kind(kind("7z")));
    assert_eq!(session.current().selected(), Some(13));
    assert_eq!(session.state(), PracticeState::Correct);
    assert_eq!(session.depth(), 1);

    // Same slot again commits and draws the next stock tile.
    assert!(session.select(13));
    assert_eq!(session.depth(), 2);
    assert_eq!(session.current().hand(), &tiles("123456789m12p55s3p")[..]);
    assert_eq!(session.current().discards(), &tiles("7z")[..]);
    assert_eq!(session.current().rounds_left(), 2);
    assert_eq!(session.current().selected(), None);
    assert_eq!(session.state(), PracticeState::Win);
}

#[test]
fn complete_hand_is_a_win_whatever_is_marked() {
    let engine = Engine::default();
    let mut session =
        PracticeSession::from_stock(&engine, tiles("123456789m123p55s"), 4, tiles("1z2z3z")).unwrap();
    assert_eq!(session.state(), PracticeState::Win);
    assert!(session.select_kind(kind("1m")));
    assert_eq!(session.state(), PracticeState::Win);
    assert_eq!(session.grade(kind("5s")), PracticeState::Win);
}

#[test]
fn tsumogiri_marks_the_drawn_tile_first() {
    let engine = Engine::default();
    let mut session = PracticeSession::from_stock(&engine, tiles("123456789m12p55s"), 5, tiles("7z1z2z3z")).unwrap();
    // Topped up with the first stock tile.
    assert_eq!(session.current().hand().last(), Some(&kind("7z")));

    assert!(session.discard_drawn());
    assert_eq!(session.current().selected(), Some(13));
    assert_eq!(session.depth(), 1);
    assert!(session.discard_drawn());
    assert_eq!(session.depth(), 2);
    assert_eq!(session.current().discards(), &tiles("7z")[..]);
    assert_eq!(session.current().hand().last(), Some(&kind("1z")));

    // The drawn tile stays at the end of the display order.
    let order = session.display_order();
    assert_eq!(order.last(), Some(&13));
}

#[test]
fn rounds_run_out_without_a_final_draw() {
    let engine = Engine::default();
    let mut session = PracticeSession::from_stock(&engine, tiles(ONE_AWAY), 1, tiles("3p1z")).unwrap();
    assert_eq!(session.current().rounds_left(), 1);
    assert!(session.select_kind(kind("7z")));
    assert!(session.discard());

    assert_eq!(session.current().hand().len(), 13);
    assert_eq!(session.current().rounds_left(), 0);
    assert_eq!(session.state(), PracticeState::Exhausted);
    assert!(!session.can_discard());
    assert!(!session.discard_drawn());
    assert!(!session.select_kind(kind("1m")));
}

#[test]
fn stock_length_caps_the_rounds() {
    let engine = Engine::default();
    // 13 tiles: one top-up draw, then two more draws available.
    let mut session = PracticeSession::from_stock(&engine, tiles("123456789m12p55s"), 18, tiles("7z1z2z")).unwrap();
    assert_eq!(session.current().rounds_left(), 3);

    for _ in 0..3 {
        assert!(session.discard_drawn());
        assert!(session.discard_drawn());
    }
    assert_eq!(session.state(), PracticeState::Exhausted);
    assert_eq!(session.current().discards(), &tiles("7z1z2z")[..]);
}

#[test]
fn back_and_retry() {
    let engine = Engine::default();
    let mut session = PracticeSession::from_stock(&engine, tiles(ONE_AWAY), 3, tiles("3p1z2z")).unwrap();
    assert_eq!(session.back(), Navigation::Closed);

    assert!(session.select_kind(kind("7z")));
    assert!(session.select_kind(kind("7z")));
    assert!(session.discard_drawn());
    assert!(session.discard_drawn());
    assert_eq!(session.depth(), 3);

    // Going back restores the previous page and its mark.
    assert_eq!(session.back(), Navigation::Popped);
    assert_eq!(session.depth(), 2);
    assert_eq!(session.current().selected(), Some(13));
    assert_eq!(session.state(), PracticeState::Win);

    let stock = session.stock().to_vec();
    session.retry();
    assert_eq!(session.depth(), 1);
    assert_eq!(session.current().selected(), None);
    assert_eq!(session.current().hand(), &tiles(ONE_AWAY)[..]);
    assert_eq!(session.stock(), &stock[..]);
    assert_eq!(session.state(), PracticeState::AwaitingDiscard);
}

#[test]
fn shuffled_stock_is_the_rest_of_the_tile_set() {
    let engine = Engine::with_available(TileSetRule::no_honors().available());
    let seed_hand = tiles("1112345678999m");
    let session = PracticeSession::from_seed(&engine, seed_hand.clone(), 18, [3; 32]).unwrap();
    // Thirteen tiles: topped up with the first stock tile.
    let hand = session.current().hand();
    assert_eq!(hand.len(), 14);
    assert_eq!(&hand[..13], &seed_hand[..]);
    assert_eq!(hand[13], session.stock()[0]);
    assert_eq!(session.stock().len(), 27 * 4 - 13);

    let mut all = session.stock().to_vec();
    all.extend_from_slice(&seed_hand);
    let counts = tile_frequencies(&all);
    for k in engine.available().kinds() {
        assert_eq!(counts[k.index()], 4, "{k}");
    }
    assert!(session.stock().iter().all(|k| !k.is_honor()));
}

#[test]
fn rejects_hands_outside_the_tile_set() {
    let engine = Engine::with_available(AvailableTiles::from_ids(&[0, 1, 2]).unwrap());
    let err = PracticeSession::from_seed(&engine, tiles("123m7z"), 5, [0; 32]).unwrap_err();
    assert!(format!("{err:#}").contains("7z"));
}

#[test]
fn analyze_from_practice_position() {
    let engine = Engine::default();
    let session = PracticeSession::from_stock(&engine, tiles(ONE_AWAY), 3, tiles("3p")).unwrap();
    let mut analyze = session.analyze(Goal::Comprehensive);
    assert_eq!(analyze.current().hand(), &tiles(ONE_AWAY)[..]);
    assert_eq!(analyze.moves()[0].kind, kind("7z"));
}
