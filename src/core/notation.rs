//! Single-line text notation for positions
//!
//! `<rows> <width>x<height> <side> <ply>`, rows listed from y = 0 and
//! separated by `/`. Inside a row a number counts consecutive open cells,
//! `x` is a blocked cell, `P` is the first player's piece and `p` the
//! second player's.

use std::str::FromStr;

use anyhow::{anyhow, bail, ensure, Context, Result};

use super::{
    bitboards::{Bitboard, BitboardOps},
    board::BoardSpec,
    loc::Loc,
    player::{Player, PlayerArray},
    state::State,
};

impl State {
    pub fn to_notation(&self) -> String {
        let board = self.board();
        let mut rows = Vec::with_capacity(board.height() as usize);

        for y in 0..board.height() {
            let mut row = String::new();
            let mut open = 0;

            for x in 0..board.width() {
                let loc = Loc::new(x, y);
                let c = if self.loc(Player::First) == Some(loc) {
                    'P'
                } else if self.loc(Player::Second) == Some(loc) {
                    'p'
                } else if !self.is_open(loc) {
                    'x'
                } else {
                    open += 1;
                    continue;
                };

                if open > 0 {
                    row.push_str(&open.to_string());
                    open = 0;
                }
                row.push(c);
            }

            if open > 0 {
                row.push_str(&open.to_string());
            }
            rows.push(row);
        }

        format!(
            "{} {}x{} {} {}",
            rows.join("/"),
            board.width(),
            board.height(),
            self.player().index(),
            self.ply_count()
        )
    }

    pub fn from_notation(notation: &str) -> Result<Self> {
        let mut parts = notation.split_whitespace();

        let rows = parts.next().ok_or_else(|| anyhow!("Missing board rows"))?;
        let board = BoardSpec::parse_dims(
            parts.next().ok_or_else(|| anyhow!("Missing board dimensions"))?,
        )?;
        let side = Player::from_index(
            parts.next()
                .ok_or_else(|| anyhow!("Missing side to move"))?
                .parse()
                .context("Invalid side to move")?,
        )?;
        let ply_count: u32 = parts.next()
            .ok_or_else(|| anyhow!("Missing ply count"))?
            .parse()
            .context("Invalid ply count")?;
        ensure!(parts.next().is_none(), "Trailing input after ply count");

        let mut occupied = Bitboard::new();
        let mut locs = PlayerArray::new(None, None);

        let rows: Vec<&str> = rows.split('/').collect();
        ensure!(
            rows.len() == board.height() as usize,
            "Expected {} rows, found {}",
            board.height(), rows.len()
        );

        for (y, row) in rows.into_iter().enumerate() {
            let mut x = 0;
            let mut chars = row.chars().peekable();

            while let Some(c) = chars.next() {
                if let Some(digit) = c.to_digit(10) {
                    let mut run = digit as i32;
                    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                        run = run.checked_mul(10)
                            .and_then(|run| run.checked_add(d as i32))
                            .filter(|&run| run <= board.width())
                            .with_context(|| format!("Row {} is too long", y))?;
                        chars.next();
                    }
                    ensure!(run > 0, "Empty run in row {}", y);
                    ensure!(x + run <= board.width(), "Row {} is too long", y);
                    x += run;
                    continue;
                }

                let loc = Loc::new(x, y as i32);
                ensure!(board.contains(loc), "Row {} is too long", y);

                let piece = match c {
                    'x' => None,
                    'P' => Some(Player::First),
                    'p' => Some(Player::Second),
                    _ => bail!("Invalid cell character: {}", c),
                };
                if let Some(player) = piece {
                    ensure!(locs[player].is_none(), "Duplicate piece for {:?}", player);
                    locs[player] = Some(loc);
                }
                occupied.set(board.index(loc), true);
                x += 1;
            }

            ensure!(x == board.width(), "Row {} has length {}, expected {}", y, x, board.width());
        }

        ensure!(
            side == Player::from_ply(ply_count),
            "Side to move {} does not match ply {}",
            side.index(), ply_count
        );
        ensure!(
            occupied.count() == ply_count,
            "Ply {} does not match {} occupied cells",
            ply_count, occupied.count()
        );
        ensure!(
            locs[Player::First].is_some() == (ply_count >= 1) &&
            locs[Player::Second].is_some() == (ply_count >= 2),
            "Pieces on the board do not match ply {}",
            ply_count
        );

        Ok(State::from_parts(board, locs, occupied, ply_count))
    }
}

impl FromStr for State {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::from_notation(s)
    }
}
