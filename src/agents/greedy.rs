use anyhow::Result;

use crate::core::{Loc, RuleError, State};
use crate::heuristics::{Heuristic, MobilityHeuristic};
use crate::utils::Deadline;

use super::{ActionSink, Agent};

/// Plays the action whose resulting position scores best for the mover
pub struct GreedyAgent<H = MobilityHeuristic> {
    heuristic: H,
}

impl<H: Heuristic> GreedyAgent<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new(MobilityHeuristic)
    }
}

impl<H: Heuristic> Agent for GreedyAgent<H> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_action(&mut self, state: &State, _: Deadline, sink: &ActionSink) -> Result<Loc> {
        let player = state.player();
        let mut best: Option<(Loc, i32)> = None;

        for action in state.actions() {
            let score = self.heuristic.score(&state.result(action)?, player);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((action, score));
                sink.emit(action);
            }
        }

        best.map(|(action, _)| action)
            .ok_or_else(|| RuleError::NoLegalActions { ply: state.ply_count() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::latest_action;
    use crate::core::Player;

    #[test]
    fn test_picks_first_best_scoring_action() {
        let state = State::default()
            .result(Loc::new(0, 0)).unwrap()
            .result(Loc::new(3, 4)).unwrap();

        let (sink, rx) = ActionSink::channel();
        let action = GreedyAgent::default().choose_action(&state, Deadline::none(), &sink).unwrap();

        // highest score, lowest cell id among equals
        let expected = state.actions()
            .into_iter()
            .max_by_key(|&a| {
                let next = state.result(a).unwrap();
                (MobilityHeuristic.score(&next, Player::First), -(state.board().index(a) as i32))
            })
            .unwrap();
        assert_eq!(action, expected);
        assert_eq!(latest_action(&rx), Some(action));
    }
}
