//! Core game representations and rules

pub mod bitboards;
pub mod board;
pub mod display;
pub mod error;
pub mod loc;
pub mod notation;
pub mod player;
pub mod state;

pub use bitboards::{Bitboard, BitboardOps};
pub use board::BoardSpec;
pub use error::RuleError;
pub use loc::Loc;
pub use player::{Player, PlayerArray};
pub use state::State;
