use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;

use crate::core::{Loc, State};
use crate::utils::Deadline;

/// Output channel of a single decision. The consumer keeps the most
/// recently emitted action.
#[derive(Debug, Clone)]
pub struct ActionSink {
    tx: Sender<Loc>,
}

impl ActionSink {
    pub fn channel() -> (Self, Receiver<Loc>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, action: Loc) {
        // the caller may already have stopped listening
        let _ = self.tx.send(action);
    }
}

/// A move-selection strategy
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Emits at least one legal action into `sink` as early as possible,
    /// possibly followed by refinements, and returns the final choice.
    /// Work should stop soon after `deadline` expires.
    fn choose_action(&mut self, state: &State, deadline: Deadline, sink: &ActionSink) -> Result<Loc>;
}

/// Drains `rx` and returns the last emitted action
pub fn latest_action(rx: &Receiver<Loc>) -> Option<Loc> {
    rx.try_iter().last()
}
