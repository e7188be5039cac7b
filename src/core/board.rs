//! Board geometry

use anyhow::{ensure, Context, Result};

use super::{
    bitboards::{Bitboard, BitboardOps},
    loc::Loc,
};

pub const STANDARD_WIDTH: i32 = 11;
pub const STANDARD_HEIGHT: i32 = 9;

/// Dimensions of a rectangular board. Cells are numbered row-major and must
/// fit in a single [`Bitboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSpec {
    width: i32,
    height: i32,
}

impl BoardSpec {
    pub const STANDARD: BoardSpec = BoardSpec {
        width: STANDARD_WIDTH,
        height: STANDARD_HEIGHT,
    };

    pub fn new(width: i32, height: i32) -> Result<Self> {
        ensure!(width > 0 && height > 0, "Board must not be empty: {}x{}", width, height);
        ensure!(
            width <= 26 && width.checked_mul(height).is_some_and(|cells| cells as u32 <= Bitboard::BITS),
            "Board {}x{} does not fit in a bitboard",
            width, height
        );
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn num_cells(&self) -> u32 {
        (self.width * self.height) as u32
    }

    /// Bitboard with every cell of this board set
    pub fn all_cells(&self) -> Bitboard {
        Bitboard::first_n(self.num_cells())
    }

    pub const fn contains(&self, loc: Loc) -> bool {
        loc.x >= 0 && loc.x < self.width &&
        loc.y >= 0 && loc.y < self.height
    }

    /// Cell id of an in-bounds location
    pub fn index(&self, loc: Loc) -> u32 {
        (loc.y * self.width + loc.x) as u32
    }

    pub fn loc_at(&self, index: u32) -> Result<Loc> {
        ensure!(index < self.num_cells(), "Cell id {} out of range", index);
        let index = index as i32;
        Ok(Loc::new(index % self.width, index / self.width))
    }

    pub fn locs(&self, bb: Bitboard) -> Vec<Loc> {
        bb.to_indices()
            .into_iter()
            .map(|idx| Loc::new(idx as i32 % self.width, idx as i32 / self.width))
            .collect()
    }

    /// Parses a cell given either by name (`c3`) or by cell id (`24`)
    pub fn parse_loc(&self, s: &str) -> Result<Loc> {
        let loc = match s.parse::<u32>() {
            Ok(index) => self.loc_at(index)?,
            Err(_) => s.parse::<Loc>()?,
        };
        ensure!(self.contains(loc), "Cell {} is off the board", s);
        Ok(loc)
    }

    /// Parses `<width>x<height>`
    pub fn parse_dims(s: &str) -> Result<Self> {
        let (w, h) = s.split_once('x')
            .with_context(|| format!("Invalid board dimensions: {}", s))?;
        Self::new(w.parse()?, h.parse()?)
    }
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self::STANDARD
    }
}
