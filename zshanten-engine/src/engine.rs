use crate::candidate::{enumerate, CandidateMove};
use crate::codec::{tile_frequencies, unseen_frequencies};
use crate::rule::AvailableTiles;
use crate::shanten::{evaluate, Goal, Shanten};
use crate::solver::{ReferenceSolver, StructuralSolver};
use crate::tile::TileKind;

/// A solver bound to the tile kinds in play.
///
/// Holds no mutable state; any number of sessions may share one engine.
#[derive(Debug, Clone)]
pub struct Engine<S = ReferenceSolver> {
    solver: S,
    available: AvailableTiles,
}

impl Engine<ReferenceSolver> {
    pub fn with_available(available: AvailableTiles) -> Self {
        Self::new(ReferenceSolver, available)
    }
}

/// Reference solver over all 34 kinds.
impl Default for Engine<ReferenceSolver> {
    fn default() -> Self {
        Self::with_available(AvailableTiles::all())
    }
}

impl<S: StructuralSolver> Engine<S> {
    pub fn new(solver: S, available: AvailableTiles) -> Self {
        Self { solver, available }
    }

    #[inline]
    pub fn available(&self) -> &AvailableTiles {
        &self.available
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Evaluates `hand`, counting unseen copies against `hand` and `discards`.
    pub fn evaluate_tiles(&self, hand: &[TileKind], discards: &[TileKind], goal: Goal) -> Shanten {
        let hand_frequencies = tile_frequencies(hand);
        let unseen = unseen_frequencies(&hand_frequencies, &tile_frequencies(discards));
        evaluate(&self.solver, &self.available, &hand_frequencies, Some(&unseen), goal)
    }

    pub fn enumerate(
        &self,
        hand: &[TileKind],
        discards: &[TileKind],
        discarding: bool,
        goal: Goal,
    ) -> Vec<CandidateMove> {
        enumerate(&self.solver, &self.available, hand, discards, discarding, goal)
    }
}
