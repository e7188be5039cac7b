use anyhow::{anyhow, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::ops::{Index, IndexMut, Not};

/// One of the two players. `First` moves on even plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn all() -> [Player; 2] {
        [Player::First, Player::Second]
    }

    pub fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("Invalid player index: {}", idx))
    }

    /// The player to move after `ply` plies have been played
    pub fn from_ply(ply: u32) -> Self {
        if ply % 2 == 0 { Player::First } else { Player::Second }
    }

    pub fn index(self) -> usize {
        ToPrimitive::to_usize(&self).unwrap_or_default()
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Array indexed by player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerArray<T> {
    pub values: [T; 2],
}

impl<T> PlayerArray<T> {
    pub fn new(first: T, second: T) -> Self {
        Self {
            values: [first, second],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T> Index<Player> for PlayerArray<T> {
    type Output = T;

    fn index(&self, index: Player) -> &Self::Output {
        &self.values[index.index()]
    }
}

impl<T> IndexMut<Player> for PlayerArray<T> {
    fn index_mut(&mut self, index: Player) -> &mut Self::Output {
        &mut self.values[index.index()]
    }
}
