//! Game state and rules

use rand::{seq::IndexedRandom, Rng};

use super::{
    bitboards::{Bitboard, BitboardOps},
    board::BoardSpec,
    error::RuleError,
    loc::Loc,
    player::{Player, PlayerArray},
};

/// An immutable Isolation position.
///
/// Every cell a piece has ever stood on is occupied, including the cells the
/// pieces currently stand on. A piece that has not been placed yet may be
/// placed on any open cell; afterwards it moves by knight jumps into open
/// cells. The player to move with no legal action loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    board: BoardSpec,
    locs: PlayerArray<Option<Loc>>,
    occupied: Bitboard,
    side_to_move: Player,
    ply_count: u32,
}

impl State {
    /// The empty starting position on the given board
    pub fn new(board: BoardSpec) -> Self {
        Self {
            board,
            locs: PlayerArray::new(None, None),
            occupied: Bitboard::new(),
            side_to_move: Player::First,
            ply_count: 0,
        }
    }

    /// Assembles an already validated position
    pub(crate) fn from_parts(
        board: BoardSpec,
        locs: PlayerArray<Option<Loc>>,
        occupied: Bitboard,
        ply_count: u32,
    ) -> Self {
        Self {
            board,
            locs,
            occupied,
            side_to_move: Player::from_ply(ply_count),
            ply_count,
        }
    }

    pub fn board(&self) -> BoardSpec {
        self.board
    }

    pub fn loc(&self, player: Player) -> Option<Loc> {
        self.locs[player]
    }

    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    /// The player to move
    pub fn player(&self) -> Player {
        self.side_to_move
    }

    pub fn is_open(&self, loc: Loc) -> bool {
        self.board.contains(loc) && !self.occupied.get(self.board.index(loc))
    }

    fn open_cells(&self) -> Bitboard {
        self.board.all_cells() & !self.occupied
    }

    /// Open cells a piece at `loc` could move to, in cell id order.
    /// An unplaced piece may go to any open cell.
    pub fn liberties(&self, loc: Option<Loc>) -> Vec<Loc> {
        match loc {
            None => self.board.locs(self.open_cells()),
            Some(loc) => {
                let mut libs: Vec<Loc> = loc.knight_jumps()
                    .filter(|&to| self.is_open(to))
                    .collect();
                libs.sort_unstable();
                libs
            }
        }
    }

    pub fn count_liberties(&self, loc: Option<Loc>) -> usize {
        match loc {
            None => self.open_cells().count() as usize,
            Some(loc) => loc.knight_jumps().filter(|&to| self.is_open(to)).count(),
        }
    }

    /// Legal actions of the player to move, in cell id order
    pub fn actions(&self) -> Vec<Loc> {
        self.liberties(self.locs[self.side_to_move])
    }

    pub fn is_legal(&self, action: Loc) -> bool {
        self.is_open(action) && match self.locs[self.side_to_move] {
            None => true,
            Some(from) => from.is_knight_jump(&action),
        }
    }

    /// The position after the player to move plays `action`
    pub fn result(&self, action: Loc) -> Result<State, RuleError> {
        if !self.is_legal(action) {
            return Err(RuleError::IllegalAction { action, ply: self.ply_count });
        }

        let mut next = *self;
        next.occupied.set(self.board.index(action), true);
        next.locs[self.side_to_move] = Some(action);
        next.side_to_move = !self.side_to_move;
        next.ply_count += 1;
        Ok(next)
    }

    pub fn terminal_test(&self) -> bool {
        self.count_liberties(self.locs[self.side_to_move]) == 0
    }

    /// +1 if `player` won this finished game, -1 if it lost
    pub fn utility(&self, player: Player) -> Result<i32, RuleError> {
        if !self.terminal_test() {
            return Err(RuleError::NotTerminal { ply: self.ply_count });
        }
        Ok(if player == self.side_to_move { -1 } else { 1 })
    }

    pub fn winner(&self) -> Option<Player> {
        self.terminal_test().then(|| !self.side_to_move)
    }

    /// A uniformly random legal action
    pub fn random_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Loc, RuleError> {
        self.actions()
            .choose(rng)
            .copied()
            .ok_or(RuleError::NoLegalActions { ply: self.ply_count })
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(BoardSpec::STANDARD)
    }
}
