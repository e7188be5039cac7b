use anyhow::Result;
use rand::rngs::StdRng;

use crate::core::{Loc, State};
use crate::utils::{make_rng, Deadline};

use super::{ActionSink, Agent};

/// Plays a uniformly random legal action
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed) }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, state: &State, _: Deadline, sink: &ActionSink) -> Result<Loc> {
        let action = state.random_action(&mut self.rng)?;
        sink.emit(action);
        Ok(action)
    }
}
