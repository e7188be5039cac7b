//! Opening book files
//!
//! Books are written as MessagePack. Positions are keyed by their text
//! notation and entries are sorted by key, so equal books produce equal
//! files. Actions are stored as cell ids.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{Loc, State};

use super::{OpeningBook, RewardTally, TallyStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SavedEntries {
    Actions(Vec<(String, u32)>),
    Tallies(Vec<(String, Vec<(u32, i64)>)>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SavedBook {
    version: u32,
    entries: SavedEntries,
}

impl SavedBook {
    const VERSION: u32 = 1;

    fn new(entries: SavedEntries) -> Self {
        Self {
            version: Self::VERSION,
            entries,
        }
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize opening book")?;
        writer.flush().with_context(|| format!("Failed to write file: {}", path.display()))?;

        Ok(())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let saved: SavedBook = rmp_serde::decode::from_read(reader)
            .context("Failed to deserialize opening book")?;

        if saved.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported opening book format version: {}. Expected {}",
                saved.version,
                Self::VERSION
            ));
        }
        Ok(saved)
    }
}

fn decode_action(state: &State, cell: u32) -> Result<Loc> {
    state.board().loc_at(cell)
        .with_context(|| format!("Invalid action for {}", state.to_notation()))
}

impl OpeningBook {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut entries: Vec<(String, u32)> = self.iter()
            .map(|(state, &action)| (state.to_notation(), state.board().index(action)))
            .collect();
        entries.sort();

        SavedBook::new(SavedEntries::Actions(entries)).save_to_file(path.as_ref())?;
        info!(entries = self.len(), path = %path.as_ref().display(), "opening book saved");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries = match SavedBook::load_from_file(path.as_ref())?.entries {
            SavedEntries::Actions(entries) => entries,
            SavedEntries::Tallies(_) => bail!(
                "{} holds reward tallies, not a reduced opening book",
                path.as_ref().display()
            ),
        };

        entries.into_iter()
            .map(|(notation, cell)| {
                let state = State::from_notation(&notation)?;
                Ok((state, decode_action(&state, cell)?))
            })
            .collect()
    }

    /// Loads a book, treating a missing or unreadable file as an empty book
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(book) => {
                info!(entries = book.len(), path = %path.as_ref().display(), "opening book loaded");
                book
            }
            Err(err) => {
                warn!(path = %path.as_ref().display(), "opening book unavailable: {:#}", err);
                Self::new()
            }
        }
    }
}

impl TallyStore {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut entries: Vec<(String, Vec<(u32, i64)>)> = self.iter()
            .map(|(state, tally)| {
                let rewards = tally.iter()
                    .map(|(&action, &reward)| (state.board().index(action), reward))
                    .collect();
                (state.to_notation(), rewards)
            })
            .collect();
        entries.sort();

        SavedBook::new(SavedEntries::Tallies(entries)).save_to_file(path.as_ref())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries = match SavedBook::load_from_file(path.as_ref())?.entries {
            SavedEntries::Tallies(entries) => entries,
            SavedEntries::Actions(_) => bail!(
                "{} holds a reduced opening book, not reward tallies",
                path.as_ref().display()
            ),
        };

        let mut store = TallyStore::new();
        for (notation, rewards) in entries {
            let state = State::from_notation(&notation)?;
            let tally = rewards.into_iter()
                .map(|(cell, reward)| Ok((decode_action(&state, cell)?, reward)))
                .collect::<Result<RewardTally>>()?;
            store.insert(state, tally);
        }
        Ok(store)
    }
}
