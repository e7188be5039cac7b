//! Interchangeable move-selection strategies

pub mod book;
pub mod greedy;
pub mod minimax;
pub mod random;
mod traits;

pub use book::{BookAgent, PolicyPhase, DEFAULT_BOOK_PLIES};
pub use greedy::GreedyAgent;
pub use minimax::{MinimaxAgent, DEFAULT_SEARCH_DEPTH};
pub use random::RandomAgent;
pub use traits::*;
