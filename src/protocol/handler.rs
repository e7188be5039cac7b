//! Line protocol implementation

use std::io::Write;

use anyhow::{bail, ensure, Result};
use tracing::debug;

use crate::core::State;
use crate::engine::{Engine, SearchOptions};

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Continue,
    Quit,
}

/// Splits `[<position words>..] [moves <m>..]`
fn split_moves<'a>(parts: &'a [&'a str]) -> (&'a [&'a str], &'a [&'a str]) {
    match parts.iter().position(|&p| p == "moves") {
        Some(i) => (&parts[..i], &parts[i + 1..]),
        None => (parts, &[]),
    }
}

/// Handle a protocol command, writing replies to `out`
pub fn handle_command<W: Write>(cmd: &str, engine: &mut Engine, out: &mut W) -> Result<Response> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(Response::Continue);
    }
    debug!(command = cmd, "received");

    match parts[0] {
        "hermit" => {
            writeln!(out, "id name Hermit")?;
            writeln!(out, "option name agent type combo default book var random var greedy var minimax var book")?;
            writeln!(out, "option name bookplies type spin default {}", engine.options.book_plies)?;
            writeln!(out, "option name depth type spin default {}", engine.options.search_depth)?;
            writeln!(out, "option name book type string")?;
            writeln!(out, "option name strictmode type check default {}", engine.options.strict_mode)?;
            writeln!(out, "option name seed type string")?;
            writeln!(out, "hermitok")?;
        }
        "isready" => {
            writeln!(out, "readyok")?;
        }
        "setoption" => {
            ensure!(parts.len() == 5 && parts[1] == "name" && parts[3] == "value",
                "invalid setoption command");

            engine.set_option(parts[2], parts[4])?;
        }
        "position" => {
            ensure!(parts.len() >= 2, "position command requires at least 2 arguments");
            let (position, moves) = split_moves(&parts[1..]);

            let state = match position {
                ["startpos"] => {
                    engine.reset_game();
                    engine.state
                }
                ["fen", notation @ ..] if !notation.is_empty() => {
                    State::from_notation(&notation.join(" "))?
                }
                _ => bail!("invalid position command"),
            };
            engine.set_position(state, moves)?;
        }
        "go" => {
            let args = parts[1..].join(" ");
            let search_options = args.parse::<SearchOptions>()?;

            let action = engine.play(&search_options)?;
            writeln!(out, "bestmove {}", action)?;
        }
        "move" => {
            ensure!(parts.len() == 2, "move command requires exactly 1 argument");
            engine.apply_move(parts[1])?;

            if let Some(winner) = engine.winner() {
                writeln!(out, "info result winner {}", winner.index())?;
            }
        }
        "display" => {
            writeln!(out, "{}", engine.display())?;
        }
        "getfen" => {
            writeln!(out, "{}", engine.get_fen())?;
        }
        "quit" => {
            return Ok(Response::Quit);
        }
        cmd => {
            bail!("Unknown command: {}", cmd);
        }
    }

    out.flush()?;
    Ok(Response::Continue)
}
