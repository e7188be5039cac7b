use crate::core::{Player, State};

/// Static evaluation of non-terminal positions
pub trait Heuristic: Send + Sync {
    /// Score of `state` from `player`'s point of view; higher is better
    fn score(&self, state: &State, player: Player) -> i32;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn score(&self, state: &State, player: Player) -> i32 {
        (**self).score(state, player)
    }
}
