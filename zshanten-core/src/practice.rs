//! Practice mode: a discard quiz over a fixed shuffled stock.
//!
//! The seed hand is topped up from the stock until a discard is due. Each
//! committed discard draws the next stock tile while more than one round
//! remains; the session runs out when no discard is due any more.

use anyhow::{ensure, Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use zshanten_engine::{best_kinds, Engine, Goal, ReferenceSolver, Shanten, StructuralSolver, TileKind};

use crate::analyze::AnalyzeSession;
use crate::seeding::fisher_yates_shuffle;
use crate::session::{display_order, validate_hand, Navigation, Phase};

/// Practice always grades against every winning shape.
const PRACTICE_GOAL: Goal = Goal::Comprehensive;

/// Summary of the current practice page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeState {
    /// No discard is due: the stock or the rounds ran out.
    Exhausted,
    /// The hand is already complete.
    Win,
    /// Waiting for a discard to be selected.
    AwaitingDiscard,
    /// The selected discard is among the best.
    Correct,
    /// The selected discard is not among the best.
    Incorrect,
}

#[derive(Debug, Clone)]
pub struct PracticePage {
    hand: Vec<TileKind>,
    discards: Vec<TileKind>,
    /// Next stock tile to draw.
    stock_index: usize,
    rounds_left: usize,
    selected: Option<usize>,
    shanten: Option<Shanten>,
    best: Option<u64>,
}

impl PracticePage {
    fn new(hand: Vec<TileKind>, discards: Vec<TileKind>, stock_index: usize, rounds_left: usize) -> Self {
        Self {
            hand,
            discards,
            stock_index,
            rounds_left,
            selected: None,
            shanten: None,
            best: None,
        }
    }

    pub fn hand(&self) -> &[TileKind] {
        &self.hand
    }

    pub fn discards(&self) -> &[TileKind] {
        &self.discards
    }

    pub fn rounds_left(&self) -> usize {
        self.rounds_left
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn phase(&self) -> Phase {
        Phase::of(&self.hand)
    }
}

/// Page stack for Practice mode.
#[derive(Debug)]
pub struct PracticeSession<'e, S = ReferenceSolver> {
    engine: &'e Engine<S>,
    /// Shuffled once; draws follow this order.
    stock: Vec<TileKind>,
    current: PracticePage,
    history: Vec<PracticePage>,
}

impl<'e, S: StructuralSolver> PracticeSession<'e, S> {
    /// Deals a session: the stock is every available copy not in `hand`,
    /// shuffled with `rng`.
    pub fn new<R: Rng>(engine: &'e Engine<S>, hand: Vec<TileKind>, rounds: usize, rng: &mut R) -> Result<Self> {
        validate_seed(engine, &hand, rounds)?;
        let mut stock = engine.available().expanded();
        for kind in &hand {
            if let Some(pos) = stock.iter().position(|k| k == kind) {
                stock.remove(pos);
            }
        }
        fisher_yates_shuffle(&mut stock, rng);
        Ok(Self::deal(engine, hand, rounds, stock))
    }

    /// Deals a session with a `ChaCha8Rng` seeded from `seed`.
    pub fn from_seed(engine: &'e Engine<S>, hand: Vec<TileKind>, rounds: usize, seed: [u8; 32]) -> Result<Self> {
        let mut rng = ChaCha8Rng::from_seed(seed);
        Self::new(engine, hand, rounds, &mut rng)
    }

    /// Deals a session over a stock given in draw order.
    pub fn from_stock(
        engine: &'e Engine<S>,
        hand: Vec<TileKind>,
        rounds: usize,
        stock: Vec<TileKind>,
    ) -> Result<Self> {
        validate_seed(engine, &hand, rounds)?;
        Ok(Self::deal(engine, hand, rounds, stock))
    }

    fn deal(engine: &'e Engine<S>, mut hand: Vec<TileKind>, rounds: usize, stock: Vec<TileKind>) -> Self {
        let stock_index = 2 - hand.len() % 3;
        if stock_index <= stock.len() {
            hand.extend_from_slice(&stock[..stock_index]);
        } else {
            log::warn!(
                "practice: stock of {} cannot top up a {} tile hand",
                stock.len(),
                hand.len()
            );
        }
        let rounds_left = rounds.min((stock.len() + 1).saturating_sub(stock_index));
        log::info!(
            "practice: dealt {} tiles, {} in stock, {} round(s)",
            hand.len(),
            stock.len(),
            rounds_left
        );
        Self {
            engine,
            stock,
            current: PracticePage::new(hand, Vec::new(), stock_index, rounds_left),
            history: Vec::new(),
        }
    }

    pub fn stock(&self) -> &[TileKind] {
        &self.stock
    }

    pub fn current(&self) -> &PracticePage {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }

    pub fn can_discard(&self) -> bool {
        self.current.phase().is_discarding()
    }

    pub fn display_order(&self) -> Vec<usize> {
        display_order(&self.current.hand)
    }

    /// Evaluation of the current hand before any discard.
    pub fn shanten(&mut self) -> &Shanten {
        let engine = self.engine;
        let page = &mut self.current;
        page.shanten
            .get_or_insert_with(|| engine.evaluate_tiles(&page.hand, &page.discards, PRACTICE_GOAL))
    }

    /// Kinds whose discard keeps the best shanten and useful count.
    pub fn best_kinds(&mut self) -> u64 {
        let engine = self.engine;
        let page = &mut self.current;
        *page.best.get_or_insert_with(|| {
            best_kinds(&engine.enumerate(&page.hand, &page.discards, true, PRACTICE_GOAL))
        })
    }

    /// Grades discarding `kind` from the current hand.
    pub fn grade(&mut self, kind: TileKind) -> PracticeState {
        if !self.can_discard() {
            return PracticeState::Exhausted;
        }
        if self.shanten().is_complete() {
            return PracticeState::Win;
        }
        if self.best_kinds() & kind.bit() != 0 {
            PracticeState::Correct
        } else {
            PracticeState::Incorrect
        }
    }

    pub fn state(&mut self) -> PracticeState {
        if !self.can_discard() {
            return PracticeState::Exhausted;
        }
        if let Some(slot) = self.current.selected {
            let kind = self.current.hand[slot];
            return self.grade(kind);
        }
        if self.shanten().is_complete() {
            PracticeState::Win
        } else {
            PracticeState::AwaitingDiscard
        }
    }

    /// Marks hand slot `slot`; selecting the marked slot again commits it.
    pub fn select(&mut self, slot: usize) -> bool {
        if !self.can_discard() || slot >= self.current.hand.len() {
            return false;
        }
        if self.current.selected == Some(slot) {
            self.discard()
        } else {
            self.current.selected = Some(slot);
            true
        }
    }

    /// Selects the last copy of `kind` in hand.
    pub fn select_kind(&mut self, kind: TileKind) -> bool {
        if !self.can_discard() {
            return false;
        }
        match self.current.hand.iter().rposition(|&k| k == kind) {
            Some(slot) => self.select(slot),
            None => false,
        }
    }

    /// Marks the drawn tile when nothing is marked, otherwise commits.
    pub fn discard_drawn(&mut self) -> bool {
        if !self.can_discard() {
            return false;
        }
        match self.current.selected {
            Some(_) => self.discard(),
            None => {
                self.current.selected = Some(self.current.hand.len() - 1);
                true
            }
        }
    }

    /// Commits the marked discard and deals the next page.
    pub fn discard(&mut self) -> bool {
        let Some(slot) = self.current.selected.filter(|_| self.can_discard()) else {
            return false;
        };
        let mut hand = self.current.hand.clone();
        let mut discards = self.current.discards.clone();
        discards.push(hand.remove(slot));
        let mut stock_index = self.current.stock_index;
        if self.current.rounds_left > 1 {
            if let Some(&tile) = self.stock.get(stock_index) {
                hand.push(tile);
                stock_index += 1;
            }
        }
        let rounds_left = self.current.rounds_left.saturating_sub(1);
        let page = PracticePage::new(hand, discards, stock_index, rounds_left);
        self.history.push(std::mem::replace(&mut self.current, page));
        log::debug!("practice: discard, {rounds_left} round(s) left");
        true
    }

    pub fn back(&mut self) -> Navigation {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                log::debug!("practice: back to depth {}", self.depth());
                Navigation::Popped
            }
            None => Navigation::Closed,
        }
    }

    /// Returns to the first page with its selection cleared. The stock is kept.
    pub fn retry(&mut self) {
        if let Some(first) = self.history.drain(..).next() {
            self.current = first;
        }
        self.current.selected = None;
        log::debug!("practice: retry");
    }

    /// Opens the current position in Analyze mode.
    pub fn analyze(&self, goal: Goal) -> AnalyzeSession<'e, S> {
        AnalyzeSession::from_valid(
            self.engine,
            self.current.hand.clone(),
            self.current.discards.clone(),
            goal,
        )
    }
}

fn validate_seed<S: StructuralSolver>(engine: &Engine<S>, hand: &[TileKind], rounds: usize) -> Result<()> {
    ensure!(!hand.is_empty(), "seed hand is empty");
    ensure!(rounds >= 1, "practice needs at least one round");
    validate_hand(engine, hand).context("invalid seed hand")
}
