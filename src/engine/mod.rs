mod engine;
pub mod harness;
mod options;
mod search;

pub use engine::{build_agent, Engine};
pub use harness::{play_match, timed_decision, Forfeit, ForfeitReason, MatchOutcome};
pub use options::{AgentKind, EngineOptions};
pub use search::{SearchOptions, DEFAULT_MOVE_TIME_MS};
