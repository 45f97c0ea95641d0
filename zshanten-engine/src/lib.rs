pub mod candidate;
pub mod codec;
mod engine;
pub mod errors;
pub mod rule;
pub mod shanten;
pub mod solver;
mod tests;
pub mod tile;

pub use candidate::{best_kinds, enumerate, rate_moves, CandidateMove, MoveRating};
pub use codec::{Frequencies, RankDistributions};
pub use engine::Engine;
pub use errors::{EngineError, EngineResult};
pub use rule::{AvailableTiles, HonorTiles, NumberTiles, TileSetRule};
pub use shanten::{evaluate, Goal, Shanten, UsefulTile, SHANTEN_NOT_APPLICABLE};
pub use solver::{ReferenceSolver, StructuralSolver, TileGap};
pub use tile::{
    format_tiles, parse_tiles, Suit, TileKind, CONCEALED_COUNT_MAX, FREQUENCY_MAX, NUM_TILE_KINDS,
};
