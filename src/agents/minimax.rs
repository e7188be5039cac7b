use anyhow::Result;

use crate::ai::Minimax;
use crate::core::{Loc, State};
use crate::heuristics::{Heuristic, MobilityHeuristic};
use crate::utils::Deadline;

use super::{ActionSink, Agent};

pub const DEFAULT_SEARCH_DEPTH: i32 = 3;

/// Fixed-depth minimax on every move
pub struct MinimaxAgent<H = MobilityHeuristic> {
    search: Minimax<H>,
    depth: i32,
}

impl<H: Heuristic> MinimaxAgent<H> {
    pub fn new(heuristic: H, depth: i32) -> Self {
        Self {
            search: Minimax::new(heuristic),
            depth,
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(MobilityHeuristic, DEFAULT_SEARCH_DEPTH)
    }
}

impl<H: Heuristic> Agent for MinimaxAgent<H> {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose_action(&mut self, state: &State, deadline: Deadline, sink: &ActionSink) -> Result<Loc> {
        self.search.set_deadline(deadline);
        let result = self.search.search_with(state, self.depth, |action| sink.emit(action))?;
        Ok(result.action)
    }
}
