use anyhow::{bail, Context};
use std::str::FromStr;
use std::time::Duration;

/// Per-move time limit of the match harness
pub const DEFAULT_MOVE_TIME_MS: u64 = 150;

/// Options for a single `go` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum time to think in milliseconds
    pub move_time: u64,
}

impl SearchOptions {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.move_time)
    }
}

impl FromStr for SearchOptions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = 0;
        let mut search_options = SearchOptions::default();

        let parts = s.split_whitespace().collect::<Vec<_>>();

        while i < parts.len() {
            match parts[i] {
                "movetime" if i + 1 < parts.len() => {
                    let time = parts[i + 1].parse().context("invalid movetime")?;
                    search_options.move_time = time;
                    i += 1;
                }
                p => bail!("invalid go argument {}", p)
            }
            i += 1;
        }
        Ok(search_options)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            move_time: DEFAULT_MOVE_TIME_MS,
        }
    }
}
