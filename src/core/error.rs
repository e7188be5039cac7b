use thiserror::Error;

use super::loc::Loc;

/// Contract violations of the game rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Illegal action {action} at ply {ply}")]
    IllegalAction { action: Loc, ply: u32 },

    #[error("Utility requested for non-terminal state at ply {ply}")]
    NotTerminal { ply: u32 },

    #[error("No legal actions at ply {ply}")]
    NoLegalActions { ply: u32 },
}
