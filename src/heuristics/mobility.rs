use crate::core::{Player, State};

use super::Heuristic;

/// Own liberties minus the opponent's liberties
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityHeuristic;

impl Heuristic for MobilityHeuristic {
    fn score(&self, state: &State, player: Player) -> i32 {
        let own = state.count_liberties(state.loc(player)) as i32;
        let opp = state.count_liberties(state.loc(!player)) as i32;
        own - opp
    }
}
