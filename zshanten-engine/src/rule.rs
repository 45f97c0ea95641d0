use serde::{Deserialize, Serialize};

use crate::codec::tile_frequencies;
use crate::errors::{EngineError, EngineResult};
use crate::solver::MASK_ALL;
use crate::tile::{Suit, TileKind, CONCEALED_COUNT_MAX, FREQUENCY_MAX, NUM_TILE_KINDS};

/// Which ranks of a numbered suit are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberTiles {
    #[default]
    All,
    /// Only ranks 1 and 9.
    TerminalsOnly,
    None,
}

/// Which honor kinds are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HonorTiles {
    #[default]
    All,
    /// Four winds (1z-4z).
    WindsOnly,
    /// Three dragons (5z-7z).
    DragonsOnly,
    None,
}

/// Per-suit selection of the tile kinds that may be dealt and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSetRule {
    pub manzu: NumberTiles,
    pub pinzu: NumberTiles,
    pub souzu: NumberTiles,
    pub honors: HonorTiles,
}

impl TileSetRule {
    pub fn full() -> Self {
        Self::default()
    }

    /// Numbered suits only.
    pub fn no_honors() -> Self {
        Self {
            honors: HonorTiles::None,
            ..Self::default()
        }
    }

    /// Terminals and honors only, the orphans practice set.
    pub fn terminals_and_honors() -> Self {
        Self {
            manzu: NumberTiles::TerminalsOnly,
            pinzu: NumberTiles::TerminalsOnly,
            souzu: NumberTiles::TerminalsOnly,
            honors: HonorTiles::All,
        }
    }

    /// One numbered suit, the classic single-suit drill.
    pub fn single_suit(suit: Suit) -> Self {
        let pick = |s: Suit| {
            if s == suit {
                NumberTiles::All
            } else {
                NumberTiles::None
            }
        };
        Self {
            manzu: pick(Suit::Manzu),
            pinzu: pick(Suit::Pinzu),
            souzu: pick(Suit::Souzu),
            honors: if suit == Suit::Jihai {
                HonorTiles::All
            } else {
                HonorTiles::None
            },
        }
    }

    pub fn available(&self) -> AvailableTiles {
        let mut mask = 0u64;
        for (suit, setting) in [
            (Suit::Manzu, self.manzu),
            (Suit::Pinzu, self.pinzu),
            (Suit::Souzu, self.souzu),
        ] {
            let ranks: &[u8] = match setting {
                NumberTiles::All => &[0, 1, 2, 3, 4, 5, 6, 7, 8],
                NumberTiles::TerminalsOnly => &[0, 8],
                NumberTiles::None => &[],
            };
            for &rank in ranks {
                if let Some(k) = TileKind::from_suit_rank(suit, rank) {
                    mask |= k.bit();
                }
            }
        }
        let honor_ranks: &[u8] = match self.honors {
            HonorTiles::All => &[0, 1, 2, 3, 4, 5, 6],
            HonorTiles::WindsOnly => &[0, 1, 2, 3],
            HonorTiles::DragonsOnly => &[4, 5, 6],
            HonorTiles::None => &[],
        };
        for &rank in honor_ranks {
            if let Some(k) = TileKind::from_suit_rank(Suit::Jihai, rank) {
                mask |= k.bit();
            }
        }
        AvailableTiles { mask }
    }
}

/// The set of tile kinds in play. Each kind contributes four physical copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<TileKind>", from = "Vec<TileKind>")]
pub struct AvailableTiles {
    mask: u64,
}

impl Default for AvailableTiles {
    fn default() -> Self {
        Self::all()
    }
}

impl AvailableTiles {
    pub const fn all() -> Self {
        Self { mask: MASK_ALL }
    }

    pub const fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = TileKind>) -> Self {
        Self {
            mask: kinds.into_iter().fold(0, |mask, k| mask | k.bit()),
        }
    }

    /// Builds the set from raw kind ids, rejecting ids outside 0..34.
    pub fn from_ids(ids: &[u8]) -> EngineResult<Self> {
        let mut mask = 0u64;
        for &id in ids {
            let kind = TileKind::new(id).ok_or_else(|| EngineError::InvalidTileSet {
                message: format!("kind id {id} is not below {NUM_TILE_KINDS}"),
            })?;
            mask |= kind.bit();
        }
        Ok(Self { mask })
    }

    #[inline]
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    #[inline]
    pub const fn contains(&self, kind: TileKind) -> bool {
        self.mask & kind.bit() != 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Available kinds, ascending.
    pub fn kinds(&self) -> impl Iterator<Item = TileKind> {
        TileKind::iter_mask(self.mask)
    }

    /// Every physical copy in play: four of each available kind, ascending.
    pub fn expanded(&self) -> Vec<TileKind> {
        self.kinds()
            .flat_map(|k| std::iter::repeat(k).take(FREQUENCY_MAX as usize))
            .collect()
    }

    /// Keeps, in order, the tiles this set can still supply, stopping at a
    /// full concealed hand.
    pub fn filter_hand(&self, tiles: &[TileKind]) -> Vec<TileKind> {
        let mut supply = tile_frequencies(&self.expanded());
        let mut kept = Vec::with_capacity(tiles.len().min(CONCEALED_COUNT_MAX));
        for &k in tiles {
            if kept.len() >= CONCEALED_COUNT_MAX {
                break;
            }
            let left = &mut supply[k.index()];
            if *left > 0 {
                *left -= 1;
                kept.push(k);
            }
        }
        kept
    }
}

impl From<AvailableTiles> for Vec<TileKind> {
    fn from(tiles: AvailableTiles) -> Self {
        tiles.kinds().collect()
    }
}

impl From<Vec<TileKind>> for AvailableTiles {
    fn from(kinds: Vec<TileKind>) -> Self {
        AvailableTiles::from_kinds(kinds)
    }
}

impl From<TileSetRule> for AvailableTiles {
    fn from(rule: TileSetRule) -> Self {
        rule.available()
    }
}
