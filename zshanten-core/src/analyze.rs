//! Analyze mode: free exploration of draws and discards.
//!
//! A non-empty stack of pages. Each page memoizes its evaluation and ranked
//! moves under the goal they were computed with; switching goals drops every
//! memo computed under the other goal, and they are rebuilt on demand.

use anyhow::Result;
use zshanten_engine::{
    best_kinds, rate_moves, CandidateMove, Engine, Goal, MoveRating, ReferenceSolver, Shanten,
    StructuralSolver, TileKind,
};

use crate::session::{display_order, validate_hand, Navigation, Phase};

/// One position of the exploration.
#[derive(Debug, Clone)]
pub struct Page {
    hand: Vec<TileKind>,
    discards: Vec<TileKind>,
    /// Goal the memos below were computed under.
    goal: Option<Goal>,
    shanten: Option<Shanten>,
    moves: Option<Vec<CandidateMove>>,
}

impl Page {
    fn new(hand: Vec<TileKind>, discards: Vec<TileKind>) -> Self {
        Self {
            hand,
            discards,
            goal: None,
            shanten: None,
            moves: None,
        }
    }

    pub fn hand(&self) -> &[TileKind] {
        &self.hand
    }

    pub fn discards(&self) -> &[TileKind] {
        &self.discards
    }

    pub fn phase(&self) -> Phase {
        Phase::of(&self.hand)
    }

    /// Whether any memo is present.
    pub fn is_evaluated(&self) -> bool {
        self.shanten.is_some() || self.moves.is_some()
    }

    fn invalidate(&mut self) {
        self.goal = None;
        self.shanten = None;
        self.moves = None;
    }

    fn sync_goal(&mut self, goal: Goal) {
        if self.goal != Some(goal) {
            self.invalidate();
            self.goal = Some(goal);
        }
    }

    fn shanten<S: StructuralSolver>(&mut self, engine: &Engine<S>, goal: Goal) -> &Shanten {
        self.sync_goal(goal);
        self.shanten
            .get_or_insert_with(|| engine.evaluate_tiles(&self.hand, &self.discards, goal))
    }

    fn moves<S: StructuralSolver>(&mut self, engine: &Engine<S>, goal: Goal) -> &[CandidateMove] {
        self.sync_goal(goal);
        let phase = Phase::of(&self.hand);
        self.moves.get_or_insert_with(|| match phase {
            Phase::Idle => Vec::new(),
            _ => engine.enumerate(&self.hand, &self.discards, phase.is_discarding(), goal),
        })
    }
}

/// Page stack for Analyze mode. Borrows the engine; holds no engine state.
#[derive(Debug)]
pub struct AnalyzeSession<'e, S = ReferenceSolver> {
    engine: &'e Engine<S>,
    goal: Goal,
    current: Page,
    history: Vec<Page>,
}

impl<'e, S: StructuralSolver> AnalyzeSession<'e, S> {
    /// Opens a session on `hand`, rejecting hands the engine cannot
    /// evaluate (see [`validate_hand`]).
    pub fn new(engine: &'e Engine<S>, hand: Vec<TileKind>, discards: Vec<TileKind>, goal: Goal) -> Result<Self> {
        validate_hand(engine, &hand)?;
        Ok(Self::from_valid(engine, hand, discards, goal))
    }

    pub(crate) fn from_valid(engine: &'e Engine<S>, hand: Vec<TileKind>, discards: Vec<TileKind>, goal: Goal) -> Self {
        Self {
            engine,
            goal,
            current: Page::new(hand, discards),
            history: Vec::new(),
        }
    }

    pub fn engine(&self) -> &'e Engine<S> {
        self.engine
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Switches the goal, dropping memos computed under any other goal.
    pub fn set_goal(&mut self, goal: Goal) {
        if goal == self.goal {
            return;
        }
        self.goal = goal;
        let mut dropped = 0;
        for page in self.history.iter_mut().chain(std::iter::once(&mut self.current)) {
            if page.goal.is_some() && page.goal != Some(goal) {
                page.invalidate();
                dropped += 1;
            }
        }
        log::debug!("analyze: goal {goal:?}, {dropped} page(s) invalidated");
    }

    pub fn toggle_goal(&mut self) {
        self.set_goal(self.goal.toggled());
    }

    /// Number of pages on the stack, at least one.
    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }

    pub fn current(&self) -> &Page {
        &self.current
    }

    /// Pages from the root to the current one.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.history.iter().chain(std::iter::once(&self.current))
    }

    pub fn phase(&self) -> Phase {
        self.current.phase()
    }

    pub fn shanten(&mut self) -> &Shanten {
        self.current.shanten(self.engine, self.goal)
    }

    /// Ranked moves of the current page; empty on an idle page.
    pub fn moves(&mut self) -> &[CandidateMove] {
        self.current.moves(self.engine, self.goal)
    }

    /// Rating of each ranked move, in the same order as [`Self::moves`].
    pub fn ratings(&mut self) -> Vec<MoveRating> {
        let current = self.shanten().min;
        let discarding = self.phase().is_discarding();
        rate_moves(self.moves(), current, discarding)
    }

    /// Kinds of the moves tied with the best one.
    pub fn best_kinds(&mut self) -> u64 {
        best_kinds(self.moves())
    }

    /// Slot indices of the current hand in display order.
    pub fn display_order(&self) -> Vec<usize> {
        display_order(&self.current.hand)
    }

    /// Follows the ranked move of `kind`. Returns false when no such move exists.
    pub fn choose(&mut self, kind: TileKind) -> bool {
        let Some(mv) = self.moves().iter().find(|mv| mv.kind == kind) else {
            return false;
        };
        let page = Page::new(mv.hand.clone(), mv.discards.clone());
        self.push(page);
        true
    }

    /// Discards the tile in hand slot `slot`. Only valid on a discard page.
    pub fn discard_slot(&mut self, slot: usize) -> bool {
        if !self.phase().is_discarding() || slot >= self.current.hand.len() {
            return false;
        }
        let mut hand = self.current.hand.clone();
        let mut discards = self.current.discards.clone();
        discards.push(hand.remove(slot));
        self.push(Page::new(hand, discards));
        true
    }

    pub fn back(&mut self) -> Navigation {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                log::debug!("analyze: back to depth {}", self.depth());
                Navigation::Popped
            }
            None => Navigation::Closed,
        }
    }

    fn push(&mut self, page: Page) {
        let previous = std::mem::replace(&mut self.current, page);
        self.history.push(previous);
        log::debug!(
            "analyze: push {} tile(s) in hand, depth {}",
            self.current.hand.len(),
            self.depth()
        );
    }
}
