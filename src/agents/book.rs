//! Opening book driven decision policy

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::ai::Minimax;
use crate::book::{build_tree_with, OpeningBook, TallyStore};
use crate::core::{Loc, State};
use crate::heuristics::{Heuristic, MobilityHeuristic};
use crate::utils::{make_rng, Deadline};

use super::{minimax::DEFAULT_SEARCH_DEPTH, ActionSink, Agent};

/// Book horizon: positions before this ply are answered from the book
pub const DEFAULT_BOOK_PLIES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyPhase {
    /// The book has an entry for the position
    ConsultBook,
    /// Early position missing from the book; a random action is played
    Fallback,
    LiveSearch,
}

/// Answers early positions from an opening book and searches afterwards.
///
/// In collecting mode the book is not consulted: early positions get a
/// random action whose outcome is sampled into the agent's own tallies.
pub struct BookAgent<H = MobilityHeuristic> {
    book: Arc<OpeningBook>,
    book_plies: u32,
    search: Minimax<H>,
    depth: i32,
    rng: StdRng,
    collected: Option<TallyStore>,
}

impl BookAgent<MobilityHeuristic> {
    pub fn new(book: Arc<OpeningBook>, seed: Option<u64>) -> Self {
        Self::with_heuristic(book, MobilityHeuristic, seed)
    }

    /// An agent that gathers book statistics while it plays
    pub fn collecting(seed: Option<u64>) -> Self {
        let mut agent = Self::new(Arc::new(OpeningBook::new()), seed);
        agent.collected = Some(TallyStore::new());
        agent
    }
}

impl<H: Heuristic> BookAgent<H> {
    pub fn with_heuristic(book: Arc<OpeningBook>, heuristic: H, seed: Option<u64>) -> Self {
        Self {
            book,
            book_plies: DEFAULT_BOOK_PLIES,
            search: Minimax::new(heuristic),
            depth: DEFAULT_SEARCH_DEPTH,
            rng: make_rng(seed),
            collected: None,
        }
    }

    pub fn with_book_plies(mut self, book_plies: u32) -> Self {
        self.book_plies = book_plies;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Tallies gathered so far in collecting mode
    pub fn collected(&self) -> Option<&TallyStore> {
        self.collected.as_ref()
    }

    pub fn take_collected(&mut self) -> Option<TallyStore> {
        self.collected.take()
    }

    /// Which branch of the policy answers `state`
    pub fn phase(&self, state: &State) -> PolicyPhase {
        if state.ply_count() >= self.book_plies {
            PolicyPhase::LiveSearch
        } else if self.book_action(state).is_some() {
            PolicyPhase::ConsultBook
        } else {
            PolicyPhase::Fallback
        }
    }

    fn book_action(&self, state: &State) -> Option<Loc> {
        let action = self.book.get(state)?;
        if state.is_legal(action) {
            Some(action)
        } else {
            warn!(position = %state.to_notation(), "ignoring illegal book action {}", action);
            None
        }
    }

    fn collect(&mut self, state: &State, sink: &ActionSink) -> Result<Option<Loc>> {
        let Some(store) = self.collected.as_mut() else {
            return Ok(None);
        };

        let action = state.random_action(&mut self.rng)?;
        sink.emit(action);

        let depth = self.book_plies - state.ply_count();
        build_tree_with(state, store, depth, Some(action), &mut self.rng)?;
        Ok(Some(action))
    }
}

impl<H: Heuristic> Agent for BookAgent<H> {
    fn name(&self) -> &str {
        "book"
    }

    fn choose_action(&mut self, state: &State, deadline: Deadline, sink: &ActionSink) -> Result<Loc> {
        if state.ply_count() < self.book_plies {
            if let Some(action) = self.collect(state, sink)? {
                return Ok(action);
            }
        }

        let phase = self.phase(state);
        debug!(ply = state.ply_count(), ?phase, "book agent deciding");

        match phase {
            PolicyPhase::ConsultBook => {
                let action = self.book_action(state)
                    .ok_or_else(|| anyhow::anyhow!("Book entry vanished"))?;
                sink.emit(action);
                Ok(action)
            }
            PolicyPhase::Fallback => {
                let action = state.random_action(&mut self.rng)?;
                sink.emit(action);
                Ok(action)
            }
            PolicyPhase::LiveSearch => {
                self.search.set_deadline(deadline);
                let result = self.search.search_with(state, self.depth, |action| sink.emit(action))?;
                Ok(result.action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::latest_action;
    use crate::ai::minimax;

    fn decide(agent: &mut BookAgent, state: &State) -> (Loc, Option<Loc>) {
        let (sink, rx) = ActionSink::channel();
        let action = agent.choose_action(state, Deadline::none(), &sink).unwrap();
        (action, latest_action(&rx))
    }

    #[test]
    fn test_consults_book_in_the_opening() {
        let start = State::default();
        let mut book = OpeningBook::new();
        book.insert(start, Loc::new(7, 3));

        let mut agent = BookAgent::new(Arc::new(book), Some(1));
        assert_eq!(agent.phase(&start), PolicyPhase::ConsultBook);

        let (action, emitted) = decide(&mut agent, &start);
        assert_eq!(action, Loc::new(7, 3));
        assert_eq!(emitted, Some(action));
    }

    #[test]
    fn test_falls_back_to_a_random_action_on_a_miss() {
        let state = State::default().result(Loc::new(5, 4)).unwrap();
        let mut agent = BookAgent::new(Arc::new(OpeningBook::new()), Some(2));
        assert_eq!(agent.phase(&state), PolicyPhase::Fallback);

        let (action, emitted) = decide(&mut agent, &state);
        assert!(state.is_legal(action));
        assert_eq!(emitted, Some(action));
    }

    #[test]
    fn test_ignores_illegal_book_entries() {
        let state = State::default().result(Loc::new(5, 4)).unwrap();
        let mut book = OpeningBook::new();
        book.insert(state, Loc::new(5, 4));

        let agent = BookAgent::new(Arc::new(book), Some(3));
        assert_eq!(agent.phase(&state), PolicyPhase::Fallback);
    }

    #[test]
    fn test_searches_after_the_book_horizon() {
        let mut state = State::default();
        for loc in [Loc::new(0, 0), Loc::new(10, 8), Loc::new(2, 1), Loc::new(8, 7)] {
            state = state.result(loc).unwrap();
        }

        let mut book = OpeningBook::new();
        book.insert(state, state.actions()[0]);
        let mut agent = BookAgent::new(Arc::new(book), Some(4));
        assert_eq!(agent.phase(&state), PolicyPhase::LiveSearch);

        let (action, emitted) = decide(&mut agent, &state);
        assert_eq!(action, minimax(&state, DEFAULT_SEARCH_DEPTH).unwrap());
        assert_eq!(emitted, Some(action));
    }

    #[test]
    fn test_collecting_mode_records_tallies() {
        let mut agent = BookAgent::collecting(Some(5));
        let start = State::default();

        let (action, emitted) = decide(&mut agent, &start);
        assert_eq!(emitted, Some(action));

        let store = agent.collected().unwrap();
        let tally = store.get(&start).unwrap();
        assert_eq!(tally.len(), 1);
        assert_ne!(tally.get(action), 0);
        assert_eq!(store.len(), DEFAULT_BOOK_PLIES as usize);

        assert!(agent.take_collected().is_some());
        assert!(agent.collected().is_none());
    }
}
