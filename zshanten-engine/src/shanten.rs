//! Shanten evaluation.
//!
//! Merges the three structural shapes into one result: the minimum shanten,
//! the per-shape shanten, and the useful kinds together with how many copies
//! of each remain unseen.

use serde::{Deserialize, Serialize};

use crate::codec::{rank_distributions, tile_count, Frequencies};
use crate::rule::AvailableTiles;
use crate::solver::{tile_count_target, StructuralSolver, TileGap};
use crate::tile::{TileKind, CONCEALED_COUNT_MAX, FREQUENCY_MAX};

/// Shanten reported for a shape that was not evaluated.
pub const SHANTEN_NOT_APPLICABLE: i8 = TileGap::NONE.shanten();

/// Which winning shapes take part in the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Standard shape, seven pairs and thirteen orphans.
    #[default]
    Comprehensive,
    /// Standard shape only.
    StandardOnly,
}

impl Goal {
    pub const fn toggled(self) -> Self {
        match self {
            Goal::Comprehensive => Goal::StandardOnly,
            Goal::StandardOnly => Goal::Comprehensive,
        }
    }
}

/// A useful kind and the number of its copies still unseen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsefulTile {
    pub kind: TileKind,
    pub count: u8,
}

/// Evaluation of one hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shanten {
    /// Minimum over every evaluated shape. -1 means complete.
    pub min: i8,
    pub standard: i8,
    pub pairs: i8,
    pub orphans: i8,
    /// Useful kinds of the minimal shapes. Restricted to available kinds when
    /// unseen counts were supplied.
    pub mask: u64,
    /// Useful kinds in ascending order with their unseen counts. Empty when no
    /// unseen table was supplied.
    pub useful: Vec<UsefulTile>,
    /// Sum of the counts in `useful`.
    pub useful_count: u32,
}

impl Shanten {
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.min < 0
    }

    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.min == 0
    }

    /// False for the sentinel reported by shapes that were not evaluated.
    #[inline]
    pub const fn is_applicable(shanten: i8) -> bool {
        shanten != SHANTEN_NOT_APPLICABLE
    }

    pub fn useful_kinds(&self) -> impl Iterator<Item = TileKind> {
        TileKind::iter_mask(self.mask)
    }

    #[inline]
    pub const fn useful_kind_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Unseen copies of `kind` if it is useful.
    pub fn useful_count_of(&self, kind: TileKind) -> Option<u8> {
        self.useful.iter().find(|u| u.kind == kind).map(|u| u.count)
    }
}

/// Folds one shape's gap into the running minimum.
#[inline]
fn merge(best: &mut TileGap, gap: TileGap) {
    match gap.norm().cmp(&best.norm()) {
        std::cmp::Ordering::Less => *best = gap,
        std::cmp::Ordering::Equal => *best = TileGap::new(best.norm(), best.mask() | gap.mask()),
        std::cmp::Ordering::Greater => {}
    }
}

/// Evaluates a hand given as a frequency table.
///
/// Seven pairs and thirteen orphans only take part for 13 or 14 tile hands
/// under [`Goal::Comprehensive`]. When `unseen` is given the mask is
/// restricted to `available` and each useful kind records its unseen count,
/// which may be zero. Without it the mask is the solver's, unrestricted.
///
/// `hand` must hold at most 14 tiles and at most four copies of a kind.
pub fn evaluate<S: StructuralSolver>(
    solver: &S,
    available: &AvailableTiles,
    hand: &Frequencies,
    unseen: Option<&Frequencies>,
    goal: Goal,
) -> Shanten {
    debug_assert!(hand.iter().all(|&f| f <= FREQUENCY_MAX));
    let size = tile_count(hand);
    debug_assert!(size <= CONCEALED_COUNT_MAX, "hand of {size} tiles");

    let distributions = rank_distributions(hand);
    let standard = solver.solve_standard(&distributions, tile_count_target(size));
    let mut best = standard;
    let mut pairs = TileGap::NONE;
    let mut orphans = TileGap::NONE;
    if goal == Goal::Comprehensive && (size == 13 || size == 14) {
        pairs = solver.solve_pairs(&distributions);
        merge(&mut best, pairs);
        orphans = solver.solve_orphans(&distributions);
        merge(&mut best, orphans);
    }

    let mut mask = best.mask();
    let mut useful = Vec::new();
    let mut useful_count = 0;
    if let Some(unseen) = unseen {
        mask &= available.mask();
        useful.reserve(mask.count_ones() as usize);
        for kind in TileKind::iter_mask(mask) {
            let count = unseen[kind.index()];
            useful.push(UsefulTile { kind, count });
            useful_count += u32::from(count);
        }
    }

    Shanten {
        min: best.shanten(),
        standard: standard.shanten(),
        pairs: pairs.shanten(),
        orphans: orphans.shanten(),
        mask,
        useful,
        useful_count,
    }
}
