//! Text protocol spoken on stdin/stdout
pub mod command;
pub mod handler;

pub use command::parse_command;
pub use handler::{handle_command, Response};
