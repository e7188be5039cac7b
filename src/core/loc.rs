use std::{
    fmt::Display,
    ops::Add,
    str::FromStr,
};
use anyhow::{ensure, Context};

/// A cell on the board. Ordered row-major, so sorting follows cell ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc {
    pub y: i32,
    pub x: i32,
}

impl Loc {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cells reachable by a knight's jump, ignoring bounds and occupancy
    pub fn knight_jumps(self) -> impl Iterator<Item = Loc> {
        KNIGHT_OFFSETS.into_iter().map(move |delta| self + delta)
    }

    pub fn is_knight_jump(&self, other: &Loc) -> bool {
        let (dx, dy) = ((other.x - self.x).abs(), (other.y - self.y).abs());
        (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
    }
}

impl From<(i32, i32)> for Loc {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Parses `c3` style names: column letter, then 1-based row number
impl FromStr for Loc {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col = chars.next()
            .filter(|c| c.is_ascii_lowercase())
            .with_context(|| format!("Invalid cell name: {}", s))?;
        let row: i32 = chars.as_str().parse()
            .with_context(|| format!("Invalid cell row: {}", s))?;
        ensure!(row >= 1, "Invalid cell row: {}", s);

        Ok(Loc {
            x: (col as u8 - b'a') as i32,
            y: row - 1,
        })
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (self.x as u8 + b'a') as char, self.y + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocDelta {
    pub dx: i32,
    pub dy: i32,
}

impl Add<LocDelta> for Loc {
    type Output = Loc;

    fn add(self, other: LocDelta) -> Self::Output {
        Loc {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

pub const KNIGHT_OFFSETS: [LocDelta; 8] = [
    LocDelta { dx: 1, dy: -2 },
    LocDelta { dx: 2, dy: -1 },
    LocDelta { dx: 2, dy: 1 },
    LocDelta { dx: 1, dy: 2 },
    LocDelta { dx: -1, dy: 2 },
    LocDelta { dx: -2, dy: 1 },
    LocDelta { dx: -2, dy: -1 },
    LocDelta { dx: -1, dy: -2 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_name_round_trip() {
        let loc = Loc::new(2, 4);
        assert_eq!(loc.to_string(), "c5");
        assert_eq!("c5".parse::<Loc>().unwrap(), loc);
        assert!("5c".parse::<Loc>().is_err());
        assert!("c0".parse::<Loc>().is_err());
        assert!("".parse::<Loc>().is_err());
    }

    #[test]
    fn test_knight_jumps() {
        let origin = Loc::new(4, 4);
        let jumps: Vec<_> = origin.knight_jumps().collect();
        assert_eq!(jumps.len(), 8);
        assert!(jumps.iter().all(|j| origin.is_knight_jump(j)));
        assert!(!origin.is_knight_jump(&Loc::new(5, 5)));
    }

    #[test]
    fn test_row_major_order() {
        let mut locs = vec![Loc::new(0, 1), Loc::new(3, 0), Loc::new(1, 0)];
        locs.sort();
        assert_eq!(locs, vec![Loc::new(1, 0), Loc::new(3, 0), Loc::new(0, 1)]);
    }
}
