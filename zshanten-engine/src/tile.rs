//! Tile kind representation.
//!
//! Provides the 34-kind tile system: three numbered suits of nine ranks and
//! one honor suit that only populates its first seven rank slots. A kind is
//! `9 * suit + rank`, so suit and rank are recovered with a division.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile kinds (0-33).
pub const NUM_TILE_KINDS: usize = 34;

/// Number of suits, honors included.
pub const NUM_SUITS: usize = 4;

/// Rank slots per suit. The honor suit only uses the first seven.
pub const NUM_RANKS: usize = 9;

/// Rank slots populated by the honor suit.
pub const NUM_HONOR_RANKS: usize = 7;

/// Physical copies of each kind.
pub const FREQUENCY_MAX: u8 = 4;

/// Largest concealed hand the engine accepts.
pub const CONCEALED_COUNT_MAX: usize = 14;

// Suit range starts (kind indices).
pub const MANZU_START: u8 = 0;
pub const PINZU_START: u8 = 9;
pub const SOUZU_START: u8 = 18;
pub const JIHAI_START: u8 = 27;

/// The thirteen terminal and honor kinds, ascending.
pub const TERMINALS_AND_HONORS: [TileKind; 13] = [
    TileKind(0),
    TileKind(8),
    TileKind(9),
    TileKind(17),
    TileKind(18),
    TileKind(26),
    TileKind(27),
    TileKind(28),
    TileKind(29),
    TileKind(30),
    TileKind(31),
    TileKind(32),
    TileKind(33),
];

const SUIT_CODES: [char; NUM_SUITS] = ['m', 'p', 's', 'z'];

const TILE_NAMES: [&str; NUM_TILE_KINDS] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", // m
    "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", // p
    "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", // s
    "1z", "2z", "3z", "4z", "5z", "6z", "7z", // z
];

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The four tile categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Manzu = 0,
    Pinzu = 1,
    Souzu = 2,
    Jihai = 3,
}

impl Suit {
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Manzu, Suit::Pinzu, Suit::Souzu, Suit::Jihai];

    /// Position of this suit in rank distribution arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the starting kind index for this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Manzu => MANZU_START,
            Suit::Pinzu => PINZU_START,
            Suit::Souzu => SOUZU_START,
            Suit::Jihai => JIHAI_START,
        }
    }

    /// Number of rank slots actually populated.
    #[inline]
    pub const fn rank_count(self) -> usize {
        match self {
            Suit::Jihai => NUM_HONOR_RANKS,
            _ => NUM_RANKS,
        }
    }

    /// Whether three consecutive ranks of this suit form a group.
    #[inline]
    pub const fn has_sequences(self) -> bool {
        !matches!(self, Suit::Jihai)
    }

    #[inline]
    pub const fn code(self) -> char {
        SUIT_CODES[self as usize]
    }
}

// ---------------------------------------------------------------------------
// TileKind newtype
// ---------------------------------------------------------------------------

/// A tile kind in the range 0-33.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(u8);

impl TileKind {
    /// Creates a `TileKind` if `id` is in range 0..34.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < NUM_TILE_KINDS as u8 {
            Some(TileKind(id))
        } else {
            None
        }
    }

    /// Builds a kind from a suit and a 0-based rank.
    ///
    /// Returns `None` for ranks past the suit's populated slots.
    #[inline]
    pub const fn from_suit_rank(suit: Suit, rank: u8) -> Option<Self> {
        if (rank as usize) < suit.rank_count() {
            Some(TileKind(suit.start() + rank))
        } else {
            None
        }
    }

    /// Raw numeric id (0-33).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 / NUM_RANKS as u8 {
            0 => Suit::Manzu,
            1 => Suit::Pinzu,
            2 => Suit::Souzu,
            _ => Suit::Jihai,
        }
    }

    /// 0-based rank within the suit.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % NUM_RANKS as u8
    }

    /// True for rank 1 or 9 of a numbered suit.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        if self.0 >= JIHAI_START {
            return false;
        }
        let rank = self.rank();
        rank == 0 || rank == 8
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= JIHAI_START
    }

    #[inline]
    pub const fn is_terminal_or_honor(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// Single-bit mask of this kind, as used by tile-gap masks.
    #[inline]
    pub const fn bit(self) -> u64 {
        1 << self.0
    }

    /// All 34 kinds, ascending.
    pub fn all() -> impl DoubleEndedIterator<Item = TileKind> + Clone {
        (0..NUM_TILE_KINDS as u8).map(TileKind)
    }

    /// Kinds whose bit is set in `mask`, ascending. Bits past 33 are ignored.
    pub fn iter_mask(mask: u64) -> impl Iterator<Item = TileKind> {
        Self::all().filter(move |k| mask & k.bit() != 0)
    }
}

impl fmt::Debug for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileKind({}={})", self.0, TILE_NAMES[self.index()])
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TILE_NAMES[self.index()])
    }
}

impl TryFrom<u8> for TileKind {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        TileKind::new(id).ok_or_else(|| EngineError::Parse {
            input: id.to_string(),
            message: format!("tile kind must be below {NUM_TILE_KINDS}"),
        })
    }
}

impl FromStr for TileKind {
    type Err = EngineError;

    /// Parses a two-character name such as `5m` or `7z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: &str| EngineError::Parse {
            input: s.to_owned(),
            message: message.to_owned(),
        };
        let mut chars = s.chars();
        let (Some(rank), Some(code), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(parse_error("expected a rank digit followed by a suit letter"));
        };
        let suit = Suit::ALL
            .into_iter()
            .find(|suit| suit.code() == code)
            .ok_or_else(|| parse_error("unknown suit letter"))?;
        let rank = rank
            .to_digit(10)
            .filter(|&r| r >= 1)
            .ok_or_else(|| parse_error("rank must be a digit from 1"))?;
        TileKind::from_suit_rank(suit, (rank - 1) as u8)
            .ok_or_else(|| parse_error("rank out of range for suit"))
    }
}

impl Serialize for TileKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Compact notation
// ---------------------------------------------------------------------------

/// Parses compact notation such as `123m055p7z` into kinds, in order.
///
/// Ranks come before their suit letter; `0` reads as a five. Whitespace is
/// skipped. Honors only accept ranks 1-7.
pub fn parse_tiles(s: &str) -> EngineResult<Vec<TileKind>> {
    let parse_error = |message: String| EngineError::Parse {
        input: s.to_owned(),
        message,
    };
    let mut kinds = Vec::new();
    let mut ranks: Vec<u8> = Vec::new();
    for c in s.chars().filter(|c| !c.is_whitespace()) {
        if let Some(digit) = c.to_digit(10) {
            ranks.push(if digit == 0 { 4 } else { digit as u8 - 1 });
            continue;
        }
        let suit = Suit::ALL
            .into_iter()
            .find(|suit| suit.code() == c)
            .ok_or_else(|| parse_error(format!("unexpected character '{c}'")))?;
        if ranks.is_empty() {
            return Err(parse_error(format!("suit '{c}' has no ranks")));
        }
        for rank in ranks.drain(..) {
            let kind = TileKind::from_suit_rank(suit, rank)
                .ok_or_else(|| parse_error(format!("rank {} out of range for suit '{c}'", rank + 1)))?;
            kinds.push(kind);
        }
    }
    if !ranks.is_empty() {
        return Err(parse_error("ranks without a suit letter".to_owned()));
    }
    Ok(kinds)
}

/// Formats kinds in compact notation, grouping consecutive tiles of a suit.
pub fn format_tiles(kinds: &[TileKind]) -> String {
    let mut text = String::with_capacity(kinds.len() * 2);
    let mut last_suit: Option<Suit> = None;
    for k in kinds {
        let suit = k.suit();
        if let Some(last) = last_suit.filter(|&last| last != suit) {
            text.push(last.code());
        }
        last_suit = Some(suit);
        text.push(char::from(b'1' + k.rank()));
    }
    if let Some(last) = last_suit {
        text.push(last.code());
    }
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
