/// Configuration options for the engine
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::agents::{DEFAULT_BOOK_PLIES, DEFAULT_SEARCH_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Random,
    Greedy,
    Minimax,
    Book,
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(AgentKind::Random),
            "greedy" => Ok(AgentKind::Greedy),
            "minimax" => Ok(AgentKind::Minimax),
            "book" => Ok(AgentKind::Book),
            _ => bail!("Unknown agent: {}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub agent: AgentKind,
    /// Plies answered from the opening book
    pub book_plies: u32,
    pub search_depth: i32,
    pub book_path: Option<PathBuf>,
    /// Whether protocol errors abort the engine
    pub strict_mode: bool,
    pub seed: Option<u64>,
}

impl EngineOptions {
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "agent" => self.agent = value.parse()?,
            "bookplies" => self.book_plies = value.parse().context("Invalid bookplies")?,
            "depth" => {
                let depth: i32 = value.parse().context("Invalid depth")?;
                if depth < 1 {
                    bail!("Search depth must be positive, got {}", depth);
                }
                self.search_depth = depth;
            }
            "book" => self.book_path = Some(PathBuf::from(value)),
            "strictmode" => self.strict_mode = value.parse().context("Invalid strictmode")?,
            "seed" => self.seed = Some(value.parse().context("Invalid seed")?),
            _ => bail!("Unknown option: {}", name),
        }

        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            agent: AgentKind::Book,
            book_plies: DEFAULT_BOOK_PLIES,
            search_depth: DEFAULT_SEARCH_DEPTH,
            book_path: None,
            strict_mode: true,
            seed: None,
        }
    }
}
