//! Structural solver contract.
//!
//! A structural solver measures how far a hand is from one winning shape.
//! Each function takes the four rank distributions in suit order and returns
//! a [`TileGap`]: the low 34 bits are a usefulness mask indexed by tile kind,
//! the remaining high bits hold the shape's norm. Norm 0 is a complete shape,
//! norm `n > 0` is `n - 1` shanten, and [`NORM_NONE`] means the shape was not
//! evaluated.
//!
//! Implementations must be pure, deterministic and total. The engine only
//! depends on this contract, so a table-driven production solver can replace
//! [`ReferenceSolver`] without touching the evaluator.

mod reference;

pub use reference::ReferenceSolver;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::RankDistributions;
use crate::tile::{TileKind, NUM_TILE_KINDS};

/// Width of the usefulness mask.
pub const MASK_BITS: u32 = NUM_TILE_KINDS as u32;

/// Mask covering every valid tile kind.
pub const MASK_ALL: u64 = (1 << MASK_BITS) - 1;

/// Norm reported for a shape that is not applicable.
pub const NORM_NONE: u32 = 15;

/// Packed solver result: usefulness mask plus norm.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileGap(u64);

impl TileGap {
    /// A gap for a shape that was not evaluated.
    pub const NONE: TileGap = TileGap((NORM_NONE as u64) << MASK_BITS);

    #[inline]
    pub const fn new(norm: u32, mask: u64) -> Self {
        TileGap(((norm as u64) << MASK_BITS) | (mask & MASK_ALL))
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        TileGap(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn norm(self) -> u32 {
        (self.0 >> MASK_BITS) as u32
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        self.0 & MASK_ALL
    }

    #[inline]
    pub const fn has(self, kind: TileKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Shanten encoded by the norm: `norm - 1`.
    #[inline]
    pub const fn shanten(self) -> i8 {
        self.norm() as i8 - 1
    }
}

impl fmt::Debug for TileGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileGap(norm={}, mask={:#036b})", self.norm(), self.mask())
    }
}

/// Tile count of the standard shape for a hand of `hand_size` tiles.
///
/// Always `floor(hand_size / 3) * 3 + 2`: 14 for 12-14 tiles, 11 for 9-11,
/// and so on down to a lone pair.
#[inline]
pub const fn tile_count_target(hand_size: usize) -> u32 {
    (hand_size / 3 * 3 + 2) as u32
}

/// The three winning-shape evaluators consumed by the engine.
pub trait StructuralSolver {
    /// Four melds and a pair, scaled to `tile_count_target` tiles.
    fn solve_standard(&self, distributions: &RankDistributions, tile_count_target: u32) -> TileGap;

    /// Seven distinct pairs.
    fn solve_pairs(&self, distributions: &RankDistributions) -> TileGap;

    /// One of each terminal and honor plus one duplicate.
    fn solve_orphans(&self, distributions: &RankDistributions) -> TileGap;
}

impl<S: StructuralSolver + ?Sized> StructuralSolver for &S {
    fn solve_standard(&self, distributions: &RankDistributions, tile_count_target: u32) -> TileGap {
        (**self).solve_standard(distributions, tile_count_target)
    }

    fn solve_pairs(&self, distributions: &RankDistributions) -> TileGap {
        (**self).solve_pairs(distributions)
    }

    fn solve_orphans(&self, distributions: &RankDistributions) -> TileGap {
        (**self).solve_orphans(distributions)
    }
}
