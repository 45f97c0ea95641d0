#[cfg(test)]
use crate::tile::{parse_tiles, TileKind};

#[cfg(test)]
pub(crate) fn hand(s: &str) -> Vec<TileKind> {
    parse_tiles(s).unwrap()
}

#[cfg(test)]
mod unit_tests {
    use super::hand;
    use crate::candidate::{best_kinds, rate_moves, MoveRating};
    use crate::codec::{tile_frequencies, unseen_frequencies};
    use crate::rule::{AvailableTiles, TileSetRule};
    use crate::shanten::{Goal, SHANTEN_NOT_APPLICABLE};
    use crate::solver::MASK_ALL;
    use crate::tile::{Suit, TileKind, TERMINALS_AND_HONORS};
    use crate::Engine;

    fn engine() -> Engine {
        Engine::default()
    }

    fn kind(name: &str) -> TileKind {
        name.parse().unwrap()
    }

    fn mask(names: &[&str]) -> u64 {
        names.iter().fold(0, |m, n| m | kind(n).bit())
    }

    fn names(kinds: &[TileKind]) -> Vec<String> {
        kinds.iter().map(|k| k.to_string()).collect()
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    #[test]
    fn test_standard_strictly_best() {
        // 1112345678999m: pure nine gates, waits on every manzu rank.
        let s = engine().evaluate_tiles(&hand("1112345678999m"), &[], Goal::Comprehensive);
        assert_eq!(s.min, 0);
        assert_eq!(s.standard, 0);
        assert_eq!(s.pairs, 4);
        assert_eq!(s.orphans, 10);
        assert_eq!(s.mask, 0b1_1111_1111);
        assert!(s.is_ready());
        // Each manzu rank: four copies minus those held.
        let counts: Vec<u8> = s.useful.iter().map(|u| u.count).collect();
        assert_eq!(counts, vec![1, 3, 3, 3, 3, 3, 3, 3, 1]);
        assert_eq!(s.useful_count, 23);
    }

    #[test]
    fn test_alternate_shapes_tie_and_union() {
        // Thirteen isolated singles: pairs and orphans both sit at six shanten.
        let tiles = hand("147m147p147s1234z");
        let s = engine().evaluate_tiles(&tiles, &[], Goal::Comprehensive);
        assert_eq!(s.standard, 8);
        assert_eq!(s.pairs, 6);
        assert_eq!(s.orphans, 6);
        assert_eq!(s.min, 6);

        // Pairs want a second copy of anything held, orphans any terminal or honor.
        let held = tiles.iter().fold(0, |m, k| m | k.bit());
        let orphans = TERMINALS_AND_HONORS.iter().fold(0, |m, k| m | k.bit());
        assert_eq!(s.mask, held | orphans);
        assert_eq!(s.useful_kind_count(), 19);
        assert!(s.useful_kinds().any(|k| k == kind("4m")));
        assert!(s.useful_kinds().any(|k| k == kind("9m")));
    }

    #[test]
    fn test_standard_only_goal() {
        let tiles = hand("147m147p147s1234z");
        let s = engine().evaluate_tiles(&tiles, &[], Goal::StandardOnly);
        assert_eq!(s.min, 8);
        assert_eq!(s.min, s.standard);
        assert_eq!(s.pairs, SHANTEN_NOT_APPLICABLE);
        assert_eq!(s.orphans, SHANTEN_NOT_APPLICABLE);
    }

    #[test]
    fn test_twelve_tiles_skip_alternate_shapes() {
        // The same singles minus one: standard shape target is still 14 tiles.
        let s = engine().evaluate_tiles(&hand("147m147p147s123z"), &[], Goal::Comprehensive);
        assert_eq!(s.pairs, SHANTEN_NOT_APPLICABLE);
        assert_eq!(s.orphans, SHANTEN_NOT_APPLICABLE);
        assert_eq!(s.min, s.standard);
    }

    #[test]
    fn test_complete_hand() {
        let s = engine().evaluate_tiles(&hand("123456789m123p55s"), &[], Goal::Comprehensive);
        assert!(s.is_complete());
        assert_eq!(s.min, -1);
        assert_eq!(s.mask, 0);
        assert!(s.useful.is_empty());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let e = engine();
        let tiles = hand("2378m1469p35s1267z");
        let a = e.evaluate_tiles(&tiles, &hand("9s"), Goal::Comprehensive);
        let b = e.evaluate_tiles(&tiles, &hand("9s"), Goal::Comprehensive);
        assert_eq!(a, b);
    }

    #[test]
    fn test_useful_restricted_to_available() {
        let manzu = Engine::with_available(TileSetRule::single_suit(Suit::Manzu).available());
        let s = manzu.evaluate_tiles(&hand("147m147p147s1234z"), &[], Goal::Comprehensive);
        assert_eq!(s.mask & !mask(&["1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m"]), 0);
        assert_eq!(s.mask, mask(&["1m", "4m", "7m", "9m"]));
    }

    // -----------------------------------------------------------------------
    // Enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn test_single_discard_keeps_ready() {
        let moves = engine().enumerate(&hand("123456789m12p55s7z"), &[], true, Goal::Comprehensive);
        // Thirteen distinct kinds in hand.
        assert_eq!(moves.len(), 13);

        let first = &moves[0];
        assert_eq!(first.kind, kind("7z"));
        assert_eq!(names(&first.hand), names(&hand("123456789m12p55s")));
        assert_eq!(names(&first.discards), vec!["7z"]);
        assert_eq!(first.shanten.min, 0);
        assert_eq!(first.useful_kinds, 1);
        assert_eq!(first.useful_count, 4);
        assert!(moves[1..].iter().all(|m| m.shanten.min == 1));

        assert_eq!(best_kinds(&moves), kind("7z").bit());
        let ratings = rate_moves(&moves, 0, true);
        assert_eq!(ratings[0], MoveRating::Best);
        assert!(ratings[1..].iter().all(|&r| r == MoveRating::Regressive));
    }

    #[test]
    fn test_tied_discards_order_by_kind() {
        // Either single can go; each leaves a tanki on the other with three unseen.
        let moves = engine().enumerate(&hand("123456789m123p5s7z"), &[], true, Goal::Comprehensive);
        assert_eq!(moves[0].kind, kind("5s"));
        assert_eq!(moves[1].kind, kind("7z"));
        assert_eq!(moves[0].useful_count, 3);
        assert_eq!(moves[1].useful_count, 3);
        assert_eq!(best_kinds(&moves), mask(&["5s", "7z"]));
        let ratings = rate_moves(&moves, 0, true);
        assert_eq!(&ratings[..2], &[MoveRating::Best, MoveRating::Best]);
    }

    #[test]
    fn test_discard_removes_last_occurrence() {
        let moves = engine().enumerate(&hand("5s1m5s"), &hand("9p"), true, Goal::Comprehensive);
        let five = moves.iter().find(|m| m.kind == kind("5s")).unwrap();
        assert_eq!(names(&five.hand), vec!["5s", "1m"]);
        assert_eq!(names(&five.discards), vec!["9p", "5s"]);
    }

    #[test]
    fn test_draws_recount_unseen() {
        // Open wait on 1m-4m with three 1m already gone.
        let tiles = hand("23m456789p123s55z");
        let discards = hand("111m");
        let moves = engine().enumerate(&tiles, &discards, false, Goal::Comprehensive);

        // 1m still has one unseen copy, so it is drawable; both waits complete.
        assert_eq!(moves[0].kind, kind("1m"));
        assert_eq!(moves[1].kind, kind("4m"));
        assert!(moves[0].shanten.is_complete());
        assert!(moves[1].shanten.is_complete());

        let honor = moves.iter().find(|m| m.kind == kind("7z")).unwrap();
        assert_eq!(honor.shanten.min, 0);
        let counts: Vec<(String, u8)> = honor
            .shanten
            .useful
            .iter()
            .map(|u| (u.kind.to_string(), u.count))
            .collect();
        assert_eq!(counts, vec![("1m".to_owned(), 1), ("4m".to_owned(), 4)]);

        for mv in &moves {
            let unseen = unseen_frequencies(&tile_frequencies(&mv.hand), &tile_frequencies(&mv.discards));
            for u in &mv.shanten.useful {
                assert_eq!(u.count, unseen[u.kind.index()]);
            }
        }
    }

    #[test]
    fn test_exhausted_kinds_are_not_drawn() {
        let tiles = hand("23m456789p123s55z");
        let moves = engine().enumerate(&tiles, &hand("1111m"), false, Goal::Comprehensive);
        assert!(moves.iter().all(|m| m.kind != kind("1m")));
        // 33 kinds remain drawable, 5z included (two unseen).
        assert_eq!(moves.len(), 33);
        assert_eq!(moves[0].kind, kind("4m"));
    }

    #[test]
    fn test_draws_limited_to_available() {
        let e = Engine::with_available(AvailableTiles::from_ids(&[0, 1, 2]).unwrap());
        let moves = e.enumerate(&hand("1m"), &[], false, Goal::Comprehensive);
        let kinds: Vec<u8> = moves.iter().map(|m| m.kind.id()).collect();
        // Pairing the 1m completes a two-tile hand.
        assert_eq!(kinds[0], 0);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.shanten.mask & !0b111 == 0));
    }

    #[test]
    fn test_ranking_is_total_and_stable() {
        let e = engine();
        let tiles = hand("2378m1469p35s1267z");
        let a = e.enumerate(&tiles, &[], true, Goal::Comprehensive);
        let b = e.enumerate(&tiles, &[], true, Goal::Comprehensive);
        assert_eq!(a, b);
        for pair in a.windows(2) {
            assert!(pair[0].rank_cmp(&pair[1]).is_lt());
        }
    }

    #[test]
    fn test_empty_inputs_yield_nothing() {
        let e = engine();
        assert!(e.enumerate(&[], &[], true, Goal::Comprehensive).is_empty());
        assert!(e.enumerate(&[], &[], false, Goal::Comprehensive).is_empty());

        let none = Engine::with_available(AvailableTiles::none());
        assert!(none.enumerate(&hand("123m"), &[], false, Goal::Comprehensive).is_empty());
        assert!(none.enumerate(&hand("1234m"), &[], true, Goal::Comprehensive).is_empty());
        assert_eq!(best_kinds(&[]), 0);
        assert!(rate_moves(&[], 0, true).is_empty());
    }

    #[test]
    fn test_draw_ratings_target_one_step() {
        // 13-tile ready hand: only the two waits reach the draw target of -1.
        let e = engine();
        let tiles = hand("23m456789p123s55z");
        let current = e.evaluate_tiles(&tiles, &[], Goal::Comprehensive).min;
        let moves = e.enumerate(&tiles, &[], false, Goal::Comprehensive);
        let ratings = rate_moves(&moves, current, false);
        assert_eq!(&ratings[..2], &[MoveRating::Best, MoveRating::Best]);
        assert!(ratings[2..].iter().all(|&r| r == MoveRating::Regressive));
        assert_eq!(best_kinds(&moves), mask(&["1m", "4m"]));
        assert_eq!(MASK_ALL.count_ones(), 34);
    }
}
