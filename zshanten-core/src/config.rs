//! Application configuration.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zshanten_engine::{AvailableTiles, Engine, Goal, TileKind, TileSetRule, CONCEALED_COUNT_MAX};

use crate::seeding::{deal_random_hand, SeedSequence};

/// Largest practice length offered.
pub const PRACTICE_ROUNDS_MAX: usize = 34;

/// User-facing settings for both modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tile kinds in play.
    pub tiles: TileSetRule,
    /// Goal used when opening Analyze.
    pub goal: Goal,
    /// Discards per practice session.
    pub practice_rounds: usize,
    /// Size of a randomly dealt hand.
    pub random_hand_size: usize,
    /// Master seed for dealing. None = seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tiles: TileSetRule::default(),
            goal: Goal::default(),
            practice_rounds: 18,
            random_hand_size: CONCEALED_COUNT_MAX,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("malformed config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=PRACTICE_ROUNDS_MAX).contains(&self.practice_rounds),
            "practice_rounds must be in 1..={PRACTICE_ROUNDS_MAX}, got {}",
            self.practice_rounds
        );
        ensure!(
            (1..=CONCEALED_COUNT_MAX).contains(&self.random_hand_size),
            "random_hand_size must be in 1..={CONCEALED_COUNT_MAX}, got {}",
            self.random_hand_size
        );
        ensure!(!self.available().is_empty(), "tile set selects no tiles");
        Ok(())
    }

    pub fn available(&self) -> AvailableTiles {
        self.tiles.available()
    }

    /// An engine over the configured tile set with the reference solver.
    pub fn engine(&self) -> Engine {
        Engine::with_available(self.available())
    }

    /// Seed stream for dealing, from `seed` or the OS when unset.
    pub fn seed_sequence(&self) -> SeedSequence {
        match self.seed {
            Some(seed) => SeedSequence::from_u64(seed),
            None => SeedSequence::new(rand::rng().random()),
        }
    }

    /// A random hand of `random_hand_size` tiles from the configured set.
    pub fn deal(&self, rng: &mut impl Rng) -> Vec<TileKind> {
        deal_random_hand(&self.available(), self.random_hand_size, rng)
    }
}
