//! Deterministic seeding, shuffling and hand dealing.
//!
//! - Vendored Fisher-Yates shuffle and partial shuffle, so a fixed RNG state
//!   yields the same stock on every `rand` version
//! - `SeedSequence`: per-session 32-byte seeds via a SHA-256 KDF
//! - `deal_random_hand`: a uniform sample of the available tiles
//!
//! # RNG choice
//!
//! Sessions built from a seed use `ChaCha8Rng`; any `rand::Rng` is accepted
//! elsewhere.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use zshanten_engine::{AvailableTiles, TileKind};

/// Fisher-Yates shuffle driven by `random_index`, which must return a value
/// in `0..bound` for the `bound` it is given.
///
/// Walks from the back; slot `i` swaps with `random_index(i + 1)`.
pub fn fisher_yates_shuffle_by<T>(slice: &mut [T], mut random_index: impl FnMut(usize) -> usize) {
    for i in (1..slice.len()).rev() {
        let j = random_index(i + 1);
        debug_assert!(j <= i);
        slice.swap(i, j);
    }
}

/// Vendored Fisher-Yates shuffle.
///
/// Does not go through `rand::seq::SliceRandom`, whose algorithm may change
/// between `rand` versions.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    fisher_yates_shuffle_by(slice, |bound| rng.random_range(0..bound));
}

/// Keeps a uniform random sample of `len` items, in sampled order.
///
/// Partial Fisher-Yates from the front; falls back to a full shuffle when
/// `len` covers the whole vector.
pub fn sample_prefix_by<T>(items: &mut Vec<T>, len: usize, mut random_index: impl FnMut(usize) -> usize) {
    if len >= items.len() {
        fisher_yates_shuffle_by(items, random_index);
        return;
    }
    let total = items.len();
    for i in 0..len {
        let j = i + random_index(total - i);
        debug_assert!(j < total);
        items.swap(i, j);
    }
    items.truncate(len);
}

pub fn sample_prefix<T>(items: &mut Vec<T>, len: usize, rng: &mut impl Rng) {
    sample_prefix_by(items, len, |bound| rng.random_range(0..bound));
}

/// A random hand of `size` tiles drawn from the available multiset, sorted.
///
/// Returns fewer tiles when the available set cannot supply `size`.
pub fn deal_random_hand(available: &AvailableTiles, size: usize, rng: &mut impl Rng) -> Vec<TileKind> {
    let mut tiles = available.expanded();
    sample_prefix(&mut tiles, size, rng);
    tiles.sort_unstable();
    tiles
}

/// Derives the seed at `index` of a sequence: `SHA-256(master || index_le)`.
pub fn derive_seed(master: &[u8; 32], index: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(master);
    hasher.update(index.to_le_bytes());
    hasher.finalize().into()
}

/// A deterministic stream of per-session seeds.
///
/// ```
/// use zshanten_core::seeding::SeedSequence;
///
/// let mut seeds = SeedSequence::new([0u8; 32]);
/// let first = seeds.next_seed();
/// let second = seeds.next_seed();
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct SeedSequence {
    master: [u8; 32],
    index: u64,
}

impl SeedSequence {
    pub fn new(master: [u8; 32]) -> Self {
        Self { master, index: 0 }
    }

    /// Spreads a small integer seed over the 32-byte master.
    pub fn from_u64(seed: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        Self::new(hasher.finalize().into())
    }

    /// Number of seeds handed out so far.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn next_seed(&mut self) -> [u8; 32] {
        let seed = derive_seed(&self.master, self.index);
        self.index += 1;
        seed
    }

    pub fn next_rng(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::from_seed(self.next_seed())
    }
}
