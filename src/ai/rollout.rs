//! Random playouts

use anyhow::Result;
use rand::Rng;

use crate::core::State;

/// Plays uniformly random actions from `state` until the game ends.
///
/// Returns +1 if the player to move in `state` wins the playout, -1 otherwise.
pub fn simulate<R: Rng + ?Sized>(state: &State, rng: &mut R) -> Result<i32> {
    let player = state.player();
    let mut current = *state;

    while !current.terminal_test() {
        let action = current.random_action(rng)?;
        current = current.result(action)?;
    }

    Ok(current.utility(player)?)
}
