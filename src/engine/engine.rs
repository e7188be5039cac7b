use std::sync::Arc;

use anyhow::{anyhow, ensure, Result};

use crate::agents::{Agent, BookAgent, GreedyAgent, MinimaxAgent, RandomAgent};
use crate::book::OpeningBook;
use crate::core::{Loc, Player, State};
use crate::heuristics::MobilityHeuristic;

use super::harness::timed_decision;
use super::options::{AgentKind, EngineOptions};
use super::search::SearchOptions;

/// Builds the agent described by `options`, sharing `book` read-only
pub fn build_agent(options: &EngineOptions, book: &Arc<OpeningBook>) -> Box<dyn Agent> {
    match options.agent {
        AgentKind::Random => Box::new(RandomAgent::new(options.seed)),
        AgentKind::Greedy => Box::new(GreedyAgent::default()),
        AgentKind::Minimax => Box::new(MinimaxAgent::new(MobilityHeuristic, options.search_depth)),
        AgentKind::Book => Box::new(
            BookAgent::new(Arc::clone(book), options.seed)
                .with_book_plies(options.book_plies)
                .with_depth(options.search_depth),
        ),
    }
}

/// Engine holds the current position, the opening book and the configured agent
pub struct Engine {
    pub options: EngineOptions,
    pub state: State,
    book: Arc<OpeningBook>,
    agent: Box<dyn Agent>,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        let book = Arc::new(match &options.book_path {
            Some(path) => OpeningBook::load_or_empty(path),
            None => OpeningBook::new(),
        });
        let agent = build_agent(&options, &book);

        Self {
            options,
            state: State::default(),
            book,
            agent,
        }
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.set_option(name, value)?;

        if name == "book" {
            if let Some(path) = &self.options.book_path {
                self.book = Arc::new(OpeningBook::load_or_empty(path));
            }
        }
        self.agent = build_agent(&self.options, &self.book);
        Ok(())
    }

    pub fn reset_game(&mut self) {
        self.state = State::new(self.state.board());
    }

    /// Sets the position to `state` followed by `moves`
    pub fn set_position<S: AsRef<str>>(&mut self, state: State, moves: &[S]) -> Result<()> {
        let mut next = state;
        for m in moves {
            next = Self::apply(&next, m.as_ref())?;
        }
        self.state = next;
        Ok(())
    }

    pub fn apply_move(&mut self, action: &str) -> Result<()> {
        self.state = Self::apply(&self.state, action)?;
        Ok(())
    }

    fn apply(state: &State, action: &str) -> Result<State> {
        let action = state.board().parse_loc(action)?;
        Ok(state.result(action)?)
    }

    /// Chooses an action for the current position without playing it
    pub fn play(&mut self, search_options: &SearchOptions) -> Result<Loc> {
        ensure!(!self.state.terminal_test(), "Game is over");

        let action = timed_decision(self.agent.as_mut(), &self.state, search_options.time_limit())
            .ok_or_else(|| anyhow!("{} agent emitted no action in time", self.agent.name()))?;
        ensure!(self.state.is_legal(action), "Agent chose illegal action {}", action);
        Ok(action)
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    pub fn display(&self) -> String {
        self.state.to_string()
    }

    pub fn get_fen(&self) -> String {
        self.state.to_notation()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_position_with_moves() {
        let mut engine = Engine::default();
        engine.set_position(State::default(), &["a1", "e1", "c2"]).unwrap();
        assert_eq!(engine.get_fen(), "x3p6/2P8/11/11/11/11/11/11/11 11x9 1 3");

        // b2 is not a knight jump from e1
        assert!(engine.apply_move("b2").is_err());
        engine.apply_move("g2").unwrap();
        assert_eq!(engine.state.ply_count(), 4);
    }

    #[test]
    fn test_engine_plays_book_moves() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.bin");

        let mut book = OpeningBook::new();
        book.insert(State::default(), Loc::new(3, 2));
        book.save(&path).unwrap();

        let mut engine = Engine::default();
        engine.set_option("book", path.to_str().unwrap()).unwrap();
        assert_eq!(engine.book().len(), 1);

        let action = engine.play(&SearchOptions::default()).unwrap();
        assert_eq!(action, Loc::new(3, 2));
    }

    #[test]
    fn test_switching_agents() {
        let mut engine = Engine::default();
        assert_eq!(engine.agent_name(), "book");

        engine.set_option("agent", "greedy").unwrap();
        assert_eq!(engine.agent_name(), "greedy");

        let action = engine.play(&SearchOptions::default()).unwrap();
        assert!(engine.state.is_legal(action));
    }

    #[test]
    fn test_play_on_finished_game_fails() {
        let mut engine = Engine::default();
        engine.state = "xPx/x1x/xxp 3x3 0 8".parse().unwrap();
        assert_eq!(engine.winner(), Some(Player::Second));
        assert!(engine.play(&SearchOptions::default()).is_err());
    }
}
