use std::collections::{hash_map, HashMap};

use crate::core::{Loc, State};

/// Recommended action per early-game position. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningBook {
    entries: HashMap<State, Loc>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &State) -> Option<Loc> {
        self.entries.get(state).copied()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.entries.contains_key(state)
    }

    pub fn insert(&mut self, state: State, action: Loc) -> Option<Loc> {
        self.entries.insert(state, action)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, State, Loc> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(State, Loc)> for OpeningBook {
    fn from_iter<I: IntoIterator<Item = (State, Loc)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
