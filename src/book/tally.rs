//! Reward tallies accumulated while building an opening book

use std::collections::{btree_map, hash_map, BTreeMap, HashMap};

use crate::core::{Loc, State};

use super::OpeningBook;

/// Accumulated reward per action of a single position, in cell id order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardTally {
    rewards: BTreeMap<Loc, i64>,
}

impl RewardTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: Loc, reward: i64) {
        *self.rewards.entry(action).or_insert(0) += reward;
    }

    pub fn get(&self, action: Loc) -> i64 {
        self.rewards.get(&action).copied().unwrap_or(0)
    }

    /// Action with the largest total; the lowest cell id wins ties
    pub fn best(&self) -> Option<Loc> {
        let mut best: Option<(Loc, i64)> = None;
        for (&action, &reward) in &self.rewards {
            if best.map_or(true, |(_, top)| reward > top) {
                best = Some((action, reward));
            }
        }
        best.map(|(action, _)| action)
    }

    pub fn merge(&mut self, other: &RewardTally) {
        for (&action, &reward) in &other.rewards {
            self.add(action, reward);
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Loc, i64> {
        self.rewards.iter()
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

impl FromIterator<(Loc, i64)> for RewardTally {
    fn from_iter<I: IntoIterator<Item = (Loc, i64)>>(iter: I) -> Self {
        let mut tally = RewardTally::new();
        for (action, reward) in iter {
            tally.add(action, reward);
        }
        tally
    }
}

/// Reward tallies for every position visited during book construction.
/// Revisiting a position accumulates into its existing tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyStore {
    tallies: HashMap<State, RewardTally>,
}

impl TallyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, state: &State, action: Loc, reward: i64) {
        self.tallies.entry(*state).or_default().add(action, reward);
    }

    pub fn get(&self, state: &State) -> Option<&RewardTally> {
        self.tallies.get(state)
    }

    pub fn insert(&mut self, state: State, tally: RewardTally) {
        self.tallies.insert(state, tally);
    }

    /// Adds every tally of `other` into this store
    pub fn merge(&mut self, other: TallyStore) {
        for (state, tally) in other.tallies {
            match self.tallies.entry(state) {
                hash_map::Entry::Occupied(mut entry) => entry.get_mut().merge(&tally),
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(tally);
                }
            }
        }
    }

    pub fn iter(&self) -> hash_map::Iter<'_, State, RewardTally> {
        self.tallies.iter()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Total number of (state, action) entries
    pub fn num_entries(&self) -> usize {
        self.tallies.values().map(RewardTally::len).sum()
    }

    /// Keeps only the best action of every position
    pub fn reduce(self) -> OpeningBook {
        self.tallies
            .into_iter()
            .filter_map(|(state, tally)| tally.best().map(|action| (state, action)))
            .collect()
    }
}
