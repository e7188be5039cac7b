//! Timed two-agent matches

use std::fmt;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::agents::{ActionSink, Agent};
use crate::core::{Loc, Player, PlayerArray, State};
use crate::utils::Deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    /// Nothing was emitted before the deadline
    NoAction,
    IllegalAction(Loc),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forfeit {
    pub player: Player,
    pub reason: ForfeitReason,
}

impl fmt::Display for Forfeit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ForfeitReason::NoAction => write!(f, "{:?} emitted no action in time", self.player),
            ForfeitReason::IllegalAction(action) => {
                write!(f, "{:?} emitted illegal action {}", self.player, action)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Player,
    /// Actions applied to the initial state, in order
    pub history: Vec<Loc>,
    pub plies: u32,
    pub forfeit: Option<Forfeit>,
}

/// Runs one decision on a scoped thread and returns the last action
/// emitted before the time limit. Actions still queued once the deadline
/// has passed are ignored.
///
/// The agent thread is joined before returning, so an agent that ignores
/// its deadline blocks the caller until it finishes.
pub fn timed_decision(agent: &mut dyn Agent, state: &State, time_limit: Duration) -> Option<Loc> {
    let deadline = Deadline::after(time_limit);
    let (sink, rx) = ActionSink::channel();

    thread::scope(|scope| {
        scope.spawn(move || {
            if let Err(err) = agent.choose_action(state, deadline, &sink) {
                warn!("{} agent failed: {:#}", agent.name(), err);
            }
        });

        let mut latest = None;
        loop {
            match rx.recv_timeout(deadline.remaining()) {
                Ok(_) if deadline.expired() => {
                    debug!(ply = state.ply_count(), "discarding action emitted after the deadline");
                    break;
                }
                Ok(action) => latest = Some(action),
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    debug!(ply = state.ply_count(), "decision deadline reached");
                    break;
                }
            }
        }
        latest
    })
}

/// Alternates `agents` from `initial` until one side cannot move or
/// forfeits. The loser of a finished game is the player to move in the
/// terminal position.
pub fn play_match(
    agents: &mut PlayerArray<Box<dyn Agent>>,
    time_limit: Duration,
    initial: State,
) -> Result<MatchOutcome> {
    let mut state = initial;
    let mut history = Vec::new();

    while !state.terminal_test() {
        let player = state.player();
        let agent = agents[player].as_mut();

        let reason = match timed_decision(agent, &state, time_limit) {
            Some(action) if state.is_legal(action) => {
                state = state.result(action)?;
                history.push(action);
                continue;
            }
            Some(action) => ForfeitReason::IllegalAction(action),
            None => ForfeitReason::NoAction,
        };

        let forfeit = Forfeit { player, reason };
        warn!("{}", forfeit);
        return Ok(MatchOutcome {
            winner: !player,
            plies: history.len() as u32,
            history,
            forfeit: Some(forfeit),
        });
    }

    let winner = state.winner()
        .ok_or_else(|| anyhow!("Finished match has no winner"))?;
    info!(?winner, plies = history.len(), "match finished");

    Ok(MatchOutcome {
        winner,
        plies: history.len() as u32,
        history,
        forfeit: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{GreedyAgent, MinimaxAgent, RandomAgent};
    use crate::core::BoardSpec;
    use crate::heuristics::MobilityHeuristic;

    struct SilentAgent;

    impl Agent for SilentAgent {
        fn name(&self) -> &str {
            "silent"
        }

        fn choose_action(&mut self, state: &State, _: Deadline, _: &ActionSink) -> Result<Loc> {
            Ok(state.actions()[0])
        }
    }

    struct CheatingAgent;

    impl Agent for CheatingAgent {
        fn name(&self) -> &str {
            "cheating"
        }

        fn choose_action(&mut self, _: &State, _: Deadline, sink: &ActionSink) -> Result<Loc> {
            // always the top-left cell, which is taken after the first ply
            sink.emit(Loc::new(0, 0));
            Ok(Loc::new(0, 0))
        }
    }

    struct LateAgent;

    impl Agent for LateAgent {
        fn name(&self) -> &str {
            "late"
        }

        fn choose_action(&mut self, state: &State, deadline: Deadline, sink: &ActionSink) -> Result<Loc> {
            while !deadline.expired() {
                thread::sleep(Duration::from_millis(5));
            }
            let action = state.actions()[0];
            sink.emit(action);
            Ok(action)
        }
    }

    #[test]
    fn test_actions_after_the_deadline_are_ignored() {
        let action = timed_decision(&mut LateAgent, &State::default(), Duration::from_millis(30));
        assert_eq!(action, None);

        let mut agents: PlayerArray<Box<dyn Agent>> = PlayerArray::new(
            Box::new(LateAgent),
            Box::new(RandomAgent::new(Some(6))),
        );
        let outcome = play_match(&mut agents, Duration::from_millis(30), State::default()).unwrap();
        assert_eq!(outcome.forfeit.map(|f| f.reason), Some(ForfeitReason::NoAction));
        assert_eq!(outcome.winner, Player::Second);
    }

    #[test]
    fn test_random_match_replays_to_the_same_result() {
        let board = BoardSpec::new(5, 5).unwrap();
        let mut agents: PlayerArray<Box<dyn Agent>> = PlayerArray::new(
            Box::new(RandomAgent::new(Some(1))),
            Box::new(RandomAgent::new(Some(2))),
        );

        let outcome = play_match(&mut agents, Duration::from_secs(5), State::new(board)).unwrap();
        assert!(outcome.forfeit.is_none());
        assert_eq!(outcome.plies as usize, outcome.history.len());

        let mut state = State::new(board);
        for &action in &outcome.history {
            state = state.result(action).unwrap();
        }
        assert!(state.terminal_test());
        assert_eq!(state.winner(), Some(outcome.winner));
    }

    #[test]
    fn test_silent_agent_forfeits() {
        let mut agents: PlayerArray<Box<dyn Agent>> = PlayerArray::new(
            Box::new(SilentAgent),
            Box::new(RandomAgent::new(Some(3))),
        );

        let outcome = play_match(&mut agents, Duration::from_millis(50), State::default()).unwrap();
        assert_eq!(outcome.winner, Player::Second);
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.forfeit, Some(Forfeit {
            player: Player::First,
            reason: ForfeitReason::NoAction,
        }));
    }

    #[test]
    fn test_illegal_action_forfeits() {
        let mut agents: PlayerArray<Box<dyn Agent>> = PlayerArray::new(
            Box::new(CheatingAgent),
            Box::new(CheatingAgent),
        );

        let outcome = play_match(&mut agents, Duration::from_secs(1), State::default()).unwrap();
        assert_eq!(outcome.history, vec![Loc::new(0, 0)]);
        assert_eq!(outcome.winner, Player::First);
        assert_eq!(outcome.forfeit.map(|f| f.reason), Some(ForfeitReason::IllegalAction(Loc::new(0, 0))));
    }

    #[test]
    fn test_search_agents_finish_a_small_game() {
        let board = BoardSpec::new(4, 4).unwrap();
        let mut agents: PlayerArray<Box<dyn Agent>> = PlayerArray::new(
            Box::new(MinimaxAgent::new(MobilityHeuristic, 2)),
            Box::new(GreedyAgent::default()),
        );

        let outcome = play_match(&mut agents, Duration::from_secs(5), State::new(board)).unwrap();
        assert!(outcome.forfeit.is_none());
        assert!(outcome.plies >= 2);
    }
}
