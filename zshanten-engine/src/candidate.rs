//! One-ply move enumeration and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::codec::{tile_frequencies, unseen_frequencies};
use crate::rule::AvailableTiles;
use crate::shanten::{evaluate, Goal, Shanten};
use crate::solver::StructuralSolver;
use crate::tile::TileKind;

/// A single discard or draw and the hand it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    /// Kind discarded or drawn.
    pub kind: TileKind,
    pub hand: Vec<TileKind>,
    pub discards: Vec<TileKind>,
    pub shanten: Shanten,
    /// Distinct useful kinds of the resulting hand.
    pub useful_kinds: u32,
    /// Unseen copies of those kinds.
    pub useful_count: u32,
}

impl CandidateMove {
    /// Best-first ordering: fewer shanten, more useful copies, more useful
    /// kinds, then lower kind.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.shanten
            .min
            .cmp(&other.shanten.min)
            .then_with(|| other.useful_count.cmp(&self.useful_count))
            .then_with(|| other.useful_kinds.cmp(&self.useful_kinds))
            .then_with(|| self.kind.cmp(&other.kind))
    }

    fn ties_with(&self, other: &Self) -> bool {
        self.shanten.min == other.shanten.min && self.useful_count == other.useful_count
    }
}

/// How a move compares with the best one on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRating {
    /// Reaches the target shanten with the best useful count.
    Best,
    /// Reaches the target shanten with fewer useful copies.
    Neutral,
    /// Misses the target shanten.
    Regressive,
}

impl MoveRating {
    /// Rates `mv` on a page whose hand currently sits at `current` shanten.
    ///
    /// Drawing is expected to gain a step, discarding to hold the line.
    pub fn of(mv: &CandidateMove, best: &CandidateMove, current: i8, discarding: bool) -> Self {
        let target = if discarding { current } else { current - 1 };
        if mv.shanten.min != target {
            MoveRating::Regressive
        } else if mv.useful_count == best.useful_count {
            MoveRating::Best
        } else {
            MoveRating::Neutral
        }
    }
}

/// Lists every legal discard (`discarding`) or draw from `hand`, best first.
///
/// A discard removes the last copy of a kind and appends it to the discards.
/// A draw appends any available kind with an unseen copy. Unseen counts of
/// each resulting position are recomputed from its own hand and discards.
pub fn enumerate<S: StructuralSolver>(
    solver: &S,
    available: &AvailableTiles,
    hand: &[TileKind],
    discards: &[TileKind],
    discarding: bool,
    goal: Goal,
) -> Vec<CandidateMove> {
    if hand.is_empty() || available.is_empty() {
        return Vec::new();
    }
    let hand_frequencies = tile_frequencies(hand);
    let discard_frequencies = tile_frequencies(discards);

    let kinds: Vec<TileKind> = if discarding {
        TileKind::all()
            .filter(|k| hand_frequencies[k.index()] != 0)
            .collect()
    } else {
        let unseen = unseen_frequencies(&hand_frequencies, &discard_frequencies);
        available.kinds().filter(|k| unseen[k.index()] != 0).collect()
    };

    let mut moves: Vec<CandidateMove> = kinds
        .into_iter()
        .map(|kind| {
            let mut next_hand = hand.to_vec();
            let mut next_discards = discards.to_vec();
            if discarding {
                if let Some(pos) = next_hand.iter().rposition(|&k| k == kind) {
                    next_discards.push(next_hand.remove(pos));
                }
            } else {
                next_hand.push(kind);
            }
            let next_frequencies = tile_frequencies(&next_hand);
            let unseen = unseen_frequencies(&next_frequencies, &tile_frequencies(&next_discards));
            let shanten = evaluate(solver, available, &next_frequencies, Some(&unseen), goal);
            CandidateMove {
                kind,
                hand: next_hand,
                discards: next_discards,
                useful_kinds: shanten.useful.len() as u32,
                useful_count: shanten.useful_count,
                shanten,
            }
        })
        .collect();
    moves.sort_by(CandidateMove::rank_cmp);
    moves
}

/// Mask of the moves tied with the first on shanten and useful count.
pub fn best_kinds(moves: &[CandidateMove]) -> u64 {
    let Some(first) = moves.first() else {
        return 0;
    };
    moves
        .iter()
        .take_while(|mv| mv.ties_with(first))
        .fold(0, |mask, mv| mask | mv.kind.bit())
}

/// Rating of every move in `moves`, which must already be ranked.
pub fn rate_moves(moves: &[CandidateMove], current: i8, discarding: bool) -> Vec<MoveRating> {
    let Some(best) = moves.first() else {
        return Vec::new();
    };
    moves
        .iter()
        .map(|mv| MoveRating::of(mv, best, current, discarding))
        .collect()
}
