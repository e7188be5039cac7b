//! Depth-limited minimax search

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::core::{Loc, Player, RuleError, State};
use crate::heuristics::{Heuristic, MobilityHeuristic};
use crate::utils::Deadline;

/// Value of a won terminal position; larger than any heuristic score
pub const WIN_VALUE: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search deadline expired")]
    OutOfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub action: Loc,
    /// Minimax value of `action` for the searching player
    pub value: i32,
    /// False if the deadline cut the search short
    pub completed: bool,
    pub nodes: u64,
}

/// Explicit min/max search without pruning. Terminal positions are worth
/// `±WIN_VALUE`, positions at the depth cutoff are scored by the heuristic,
/// both from the point of view of the player to move at the root.
pub struct Minimax<H = MobilityHeuristic> {
    heuristic: H,
    deadline: Deadline,
    player: Player,
    nodes: u64,
}

impl Default for Minimax<MobilityHeuristic> {
    fn default() -> Self {
        Self::new(MobilityHeuristic)
    }
}

impl<H: Heuristic> Minimax<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            deadline: Deadline::none(),
            player: Player::First,
            nodes: 0,
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = deadline;
    }

    pub fn search(&mut self, state: &State, depth: i32) -> Result<SearchResult> {
        self.search_with(state, depth, |_| {})
    }

    /// Searches every root action in order, calling `on_best` first with the
    /// first legal action and then whenever a better one is found. When the
    /// deadline expires the best fully evaluated action is returned.
    pub fn search_with<F: FnMut(Loc)>(
        &mut self,
        state: &State,
        depth: i32,
        mut on_best: F,
    ) -> Result<SearchResult> {
        self.player = state.player();
        self.nodes = 0;

        let actions = state.actions();
        let Some(&first) = actions.first() else {
            return Err(RuleError::NoLegalActions { ply: state.ply_count() }.into());
        };
        on_best(first);

        let mut best = first;
        let mut best_value = i32::MIN;
        let mut completed = true;

        for action in actions {
            let child = state.result(action)?;
            let value = match self.min_value(&child, depth - 1) {
                Ok(value) => value,
                Err(err) if err.is::<SearchError>() => {
                    completed = false;
                    break;
                }
                Err(err) => return Err(err),
            };

            if value > best_value {
                if action != best {
                    on_best(action);
                }
                best = action;
                best_value = value;
            }
        }

        debug!(
            ply = state.ply_count(),
            depth,
            nodes = self.nodes,
            completed,
            "minimax chose {} (value {})", best, best_value
        );

        Ok(SearchResult {
            action: best,
            value: best_value,
            completed,
            nodes: self.nodes,
        })
    }

    fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        if self.deadline.expired() {
            return Err(SearchError::OutOfTime);
        }
        Ok(())
    }

    fn max_value(&mut self, state: &State, depth: i32) -> Result<i32> {
        self.visit()?;
        if state.terminal_test() {
            return Ok(state.utility(self.player)? * WIN_VALUE);
        }
        if depth <= 0 {
            return Ok(self.heuristic.score(state, self.player));
        }

        let mut value = i32::MIN;
        for action in state.actions() {
            value = value.max(self.min_value(&state.result(action)?, depth - 1)?);
        }
        Ok(value)
    }

    fn min_value(&mut self, state: &State, depth: i32) -> Result<i32> {
        self.visit()?;
        if state.terminal_test() {
            return Ok(state.utility(self.player)? * WIN_VALUE);
        }
        if depth <= 0 {
            return Ok(self.heuristic.score(state, self.player));
        }

        let mut value = i32::MAX;
        for action in state.actions() {
            value = value.min(self.max_value(&state.result(action)?, depth - 1)?);
        }
        Ok(value)
    }
}

/// Best action for the player to move, using the mobility heuristic
pub fn minimax(state: &State, depth: i32) -> Result<Loc> {
    Ok(Minimax::default().search(state, depth)?.action)
}
