//! Frequency tables and packed rank distributions.
//!
//! A frequency table counts each of the 34 kinds, saturating at four. A rank
//! distribution packs one suit of a table into an integer, three bits per
//! rank slot: `sum(count[r] << (3 * r))`. The four distributions, in suit
//! order, are the input of every structural solver.

use crate::tile::{TileKind, FREQUENCY_MAX, NUM_RANKS, NUM_SUITS, NUM_TILE_KINDS};

/// Per-kind counts, each in 0..=4.
pub type Frequencies = [u8; NUM_TILE_KINDS];

/// One packed integer per suit, in suit order.
pub type RankDistributions = [u32; NUM_SUITS];

const RANK_BITS: u32 = 3;
const RANK_MASK: u32 = (1 << RANK_BITS) - 1;

/// Counts the occurrences of each kind in `tiles`, capped at four.
pub fn tile_frequencies(tiles: &[TileKind]) -> Frequencies {
    let mut frequencies = [0u8; NUM_TILE_KINDS];
    for k in tiles {
        let f = &mut frequencies[k.index()];
        if *f < FREQUENCY_MAX {
            *f += 1;
        }
    }
    frequencies
}

/// Packs each suit's rank counts into one integer.
pub fn rank_distributions(frequencies: &Frequencies) -> RankDistributions {
    let mut distributions = [0u32; NUM_SUITS];
    for k in TileKind::all() {
        let f = frequencies[k.index()];
        if f != 0 {
            distributions[k.suit().index()] += (f as u32) << (RANK_BITS * k.rank() as u32);
        }
    }
    distributions
}

/// Reads rank `rank` of a single packed distribution.
#[inline]
pub const fn distribution_count(distribution: u32, rank: usize) -> u8 {
    ((distribution >> (RANK_BITS as usize * rank)) & RANK_MASK) as u8
}

/// Inverse of [`rank_distributions`].
pub fn frequencies_from_distributions(distributions: &RankDistributions) -> Frequencies {
    let mut frequencies = [0u8; NUM_TILE_KINDS];
    for k in TileKind::all() {
        frequencies[k.index()] = distribution_count(distributions[k.suit().index()], k.rank() as usize);
    }
    frequencies
}

/// Copies of each kind not accounted for by the hand or the discards.
pub fn unseen_frequencies(hand: &Frequencies, discards: &Frequencies) -> Frequencies {
    std::array::from_fn(|k| FREQUENCY_MAX.saturating_sub(hand[k]).saturating_sub(discards[k]))
}

/// Number of tiles represented by a table.
#[inline]
pub fn tile_count(frequencies: &Frequencies) -> usize {
    frequencies.iter().map(|&f| f as usize).sum()
}

/// Single suit slice of a table, honor suit trimmed to its seven slots.
#[inline]
pub fn suit_counts(frequencies: &Frequencies, suit: usize) -> &[u8] {
    let start = suit * NUM_RANKS;
    &frequencies[start..(start + NUM_RANKS).min(NUM_TILE_KINDS)]
}
