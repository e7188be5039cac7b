use std::fmt;
use colored::Colorize;

use super::{
    loc::Loc,
    player::Player,
    state::State,
};

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();

        writeln!(f)?;
        writeln!(f, "Ply: {} | To move: {}", self.ply_count(), self.player())?;
        writeln!(f)?;

        write!(f, "   ")?;
        for x in 0..board.width() {
            write!(f, "  {}", (x as u8 + b'a') as char)?;
        }
        writeln!(f)?;

        for y in 0..board.height() {
            write!(f, "{:2} ", y + 1)?;

            for x in 0..board.width() {
                let loc = Loc::new(x, y);
                if self.loc(Player::First) == Some(loc) {
                    write!(f, "  {}", "1".bright_blue().bold())?;
                } else if self.loc(Player::Second) == Some(loc) {
                    write!(f, "  {}", "2".bright_red().bold())?;
                } else if self.is_open(loc) {
                    write!(f, "  ·")?;
                } else {
                    write!(f, "  {}", "#".dimmed())?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "{}", "Player 1".bright_blue()),
            Player::Second => write!(f, "{}", "Player 2".bright_red()),
        }
    }
}
