//! Reference structural solver.
//!
//! Every shape is measured the same way: the norm is the shape's tile count
//! minus the largest number of hand tiles that some complete instance of the
//! shape can reuse, where instances never hold more than four copies of a
//! kind. A kind is useful when one more copy of it raises that maximum.
//!
//! The standard shape is solved per suit with a dynamic program over ranks
//! that tracks sequences still waiting for their second and third tiles. The
//! per-suit tables (best coverage for `m` melds and `p` pairs) are then merged
//! across suits. Usefulness only changes the suit of the added tile, so the
//! other three suits are merged once and reused for every rank of that suit.

use super::{StructuralSolver, TileGap};
use crate::codec::{frequencies_from_distributions, suit_counts, Frequencies, RankDistributions};
use crate::tile::{Suit, TileKind, FREQUENCY_MAX, NUM_RANKS, NUM_SUITS, TERMINALS_AND_HONORS};

const MAX_MELDS: usize = 4;
const MAX_COPIES: usize = FREQUENCY_MAX as usize;
const UNREACHABLE: i8 = -1;

const PAIRS_TILE_COUNT: u32 = 14;
const PAIRS_KINDS: usize = 7;
const ORPHANS_TILE_COUNT: u32 = 14;

/// `table[m][p]`: most hand tiles covered by `m` melds and `p` pairs.
type CoverTable = [[i8; 2]; MAX_MELDS + 1];

/// `state[mid][tail][melds][pairs]`, where `mid` sequences started one rank
/// back and `tail` sequences started two ranks back.
type RankState = [[[[i8; 2]; MAX_MELDS + 1]; MAX_COPIES + 1]; MAX_COPIES + 1];

const EMPTY_TABLE: CoverTable = {
    let mut table = [[UNREACHABLE; 2]; MAX_MELDS + 1];
    table[0][0] = 0;
    table
};

/// Exhaustive, allocation-light solver used by tests, benches and sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSolver;

impl StructuralSolver for ReferenceSolver {
    fn solve_standard(&self, distributions: &RankDistributions, tile_count_target: u32) -> TileGap {
        let frequencies = frequencies_from_distributions(distributions);
        debug_assert!(tile_count_target >= 2 && (tile_count_target - 2) % 3 == 0);
        debug_assert!(tile_count_target <= 14, "standard shape larger than a full hand");
        let melds = ((tile_count_target.saturating_sub(2) / 3) as usize).min(MAX_MELDS);

        let tables: [CoverTable; NUM_SUITS] = std::array::from_fn(|suit| {
            suit_cover(suit_counts(&frequencies, suit), Suit::ALL[suit].has_sequences())
        });
        let covered = tables
            .iter()
            .fold(EMPTY_TABLE, |acc, table| merge(&acc, table))[melds][1];
        debug_assert!(covered >= 0);
        let covered = covered.max(0) as u32;

        let mut mask = 0u64;
        for suit in Suit::ALL {
            let rest = tables
                .iter()
                .enumerate()
                .filter(|&(s, _)| s != suit.index())
                .fold(EMPTY_TABLE, |acc, (_, table)| merge(&acc, table));
            let mut counts = [0u8; NUM_RANKS];
            let original = suit_counts(&frequencies, suit.index());
            counts[..original.len()].copy_from_slice(original);
            let counts = &mut counts[..original.len()];
            for rank in 0..counts.len() {
                if counts[rank] >= FREQUENCY_MAX {
                    continue;
                }
                counts[rank] += 1;
                let with = merge(&rest, &suit_cover(counts, suit.has_sequences()))[melds][1];
                counts[rank] -= 1;
                if i32::from(with) > covered as i32 {
                    if let Some(kind) = TileKind::from_suit_rank(suit, rank as u8) {
                        mask |= kind.bit();
                    }
                }
            }
        }

        TileGap::new(tile_count_target.saturating_sub(covered), mask)
    }

    fn solve_pairs(&self, distributions: &RankDistributions) -> TileGap {
        let frequencies = frequencies_from_distributions(distributions);
        let covered = pairs_cover(&frequencies);
        let mask = gain_mask(&frequencies, TileKind::all(), covered, pairs_cover);
        TileGap::new(PAIRS_TILE_COUNT - covered, mask)
    }

    fn solve_orphans(&self, distributions: &RankDistributions) -> TileGap {
        let frequencies = frequencies_from_distributions(distributions);
        let covered = orphans_cover(&frequencies);
        let mask = gain_mask(
            &frequencies,
            TERMINALS_AND_HONORS.into_iter(),
            covered,
            orphans_cover,
        );
        TileGap::new(ORPHANS_TILE_COUNT - covered, mask)
    }
}

/// Best coverage of one suit's rank counts for every meld/pair budget.
fn suit_cover(counts: &[u8], sequences: bool) -> CoverTable {
    let mut state: RankState = [[[[UNREACHABLE; 2]; MAX_MELDS + 1]; MAX_COPIES + 1]; MAX_COPIES + 1];
    state[0][0][0][0] = 0;

    for (rank, &count) in counts.iter().enumerate() {
        let mut next: RankState =
            [[[[UNREACHABLE; 2]; MAX_MELDS + 1]; MAX_COPIES + 1]; MAX_COPIES + 1];
        let can_start = sequences && rank + 2 < counts.len();

        for mid in 0..=MAX_COPIES {
            for tail in 0..=MAX_COPIES - mid {
                let carried = mid + tail;
                let max_start = if can_start { MAX_COPIES - carried } else { 0 };
                for melds in 0..=MAX_MELDS {
                    for pairs in 0..2 {
                        let covered = state[mid][tail][melds][pairs];
                        if covered == UNREACHABLE {
                            continue;
                        }
                        for start in 0..=max_start {
                            for triplet in 0..=1 {
                                let total_melds = melds + start + triplet;
                                if total_melds > MAX_MELDS {
                                    break;
                                }
                                for pair in 0..=(1 - pairs) {
                                    let used = carried + start + 3 * triplet + 2 * pair;
                                    if used > MAX_COPIES {
                                        break;
                                    }
                                    let gain = used.min(count as usize) as i8;
                                    let slot = &mut next[start][mid][total_melds][pairs + pair];
                                    *slot = (*slot).max(covered + gain);
                                }
                            }
                        }
                    }
                }
            }
        }
        state = next;
    }

    // Sequences never start within two ranks of the end, so nothing is pending.
    state[0][0]
}

/// Merges two coverage tables, summing meld and pair budgets.
fn merge(a: &CoverTable, b: &CoverTable) -> CoverTable {
    let mut out = [[UNREACHABLE; 2]; MAX_MELDS + 1];
    for ma in 0..=MAX_MELDS {
        for pa in 0..2 {
            let x = a[ma][pa];
            if x == UNREACHABLE {
                continue;
            }
            for mb in 0..=MAX_MELDS - ma {
                for pb in 0..2 - pa {
                    let y = b[mb][pb];
                    if y == UNREACHABLE {
                        continue;
                    }
                    let slot = &mut out[ma + mb][pa + pb];
                    *slot = (*slot).max(x + y);
                }
            }
        }
    }
    out
}

fn pairs_cover(frequencies: &Frequencies) -> u32 {
    let mut capped = frequencies.map(|f| f.min(2));
    capped.sort_unstable_by(|a, b| b.cmp(a));
    capped[..PAIRS_KINDS].iter().map(|&f| f as u32).sum()
}

fn orphans_cover(frequencies: &Frequencies) -> u32 {
    let kinds = TERMINALS_AND_HONORS
        .iter()
        .filter(|k| frequencies[k.index()] > 0)
        .count() as u32;
    let duplicate = TERMINALS_AND_HONORS
        .iter()
        .any(|k| frequencies[k.index()] >= 2);
    kinds + duplicate as u32
}

/// Kinds among `candidates` whose extra copy raises `cover` above `base`.
fn gain_mask(
    frequencies: &Frequencies,
    candidates: impl Iterator<Item = TileKind>,
    base: u32,
    cover: fn(&Frequencies) -> u32,
) -> u64 {
    let mut scratch = *frequencies;
    let mut mask = 0u64;
    for kind in candidates {
        let f = scratch[kind.index()];
        if f >= FREQUENCY_MAX {
            continue;
        }
        scratch[kind.index()] = f + 1;
        if cover(&scratch) > base {
            mask |= kind.bit();
        }
        scratch[kind.index()] = f;
    }
    mask
}
