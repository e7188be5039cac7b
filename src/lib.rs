//! Hermit - Engine for knight's Isolation

pub mod agents;
pub mod ai;
pub mod book;
pub mod core;
pub mod engine;
pub mod heuristics;
pub mod protocol;
pub mod utils;

// Re-export commonly used items
pub use core::{Loc, Player, State};
pub use engine::Engine;
