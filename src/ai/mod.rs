//! Search and playout routines over [`State`](crate::core::State)
pub mod minimax;
pub mod rollout;

pub use minimax::{minimax, Minimax, SearchError, SearchResult, WIN_VALUE};
pub use rollout::simulate;

#[cfg(test)]
mod tests;
