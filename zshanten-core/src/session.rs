//! Pieces shared by the Analyze and Practice page stacks.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use zshanten_engine::{Engine, StructuralSolver, TileKind, CONCEALED_COUNT_MAX, FREQUENCY_MAX, NUM_TILE_KINDS};

/// What the next move on a page is, decided by the hand size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `len % 3 == 1`: a tile comes in.
    Draw,
    /// `len % 3 == 2`: a tile goes out.
    Discard,
    /// `len % 3 == 0`: nothing to enumerate.
    Idle,
}

impl Phase {
    pub fn of(hand: &[TileKind]) -> Self {
        match hand.len() % 3 {
            1 => Phase::Draw,
            2 => Phase::Discard,
            _ => Phase::Idle,
        }
    }

    #[inline]
    pub fn is_discarding(self) -> bool {
        self == Phase::Discard
    }
}

/// Outcome of a back request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The top page was removed.
    Popped,
    /// Only the root page is left; the caller should close the session.
    Closed,
}

/// Hand slot indices in display order: sorted by kind, except that a freshly
/// drawn tile (the last one of a discard-phase hand) stays at the end.
pub fn display_order(hand: &[TileKind]) -> Vec<usize> {
    let sorted_len = if Phase::of(hand).is_discarding() {
        hand.len() - 1
    } else {
        hand.len()
    };
    let mut order: Vec<usize> = (0..sorted_len).collect();
    order.sort_by_key(|&i| hand[i]);
    order.extend(sorted_len..hand.len());
    order
}

/// Checks that `hand` fits a concealed hand over the engine's tile set: at
/// most 14 tiles, only available kinds, at most four copies of each.
pub fn validate_hand<S: StructuralSolver>(engine: &Engine<S>, hand: &[TileKind]) -> Result<()> {
    ensure!(
        hand.len() <= CONCEALED_COUNT_MAX,
        "hand has {} tiles, at most {CONCEALED_COUNT_MAX} allowed",
        hand.len()
    );
    let mut counts = [0usize; NUM_TILE_KINDS];
    for &kind in hand {
        ensure!(engine.available().contains(kind), "{kind} is not an available tile");
        counts[kind.index()] += 1;
        ensure!(
            counts[kind.index()] <= FREQUENCY_MAX as usize,
            "hand holds more than {FREQUENCY_MAX} copies of {kind}"
        );
    }
    Ok(())
}
