use std::fmt;

use crate::constants::{CELLS, LINES, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A `(row, col)` coordinate on the board.
pub type Point = (usize, usize);

/// A 3x3 grid of cells, stored row-major. `None` is an empty cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Player>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn idx(row: usize, col: usize) -> usize {
        row * N + col
    }

    /// Cell contents, or `None` when empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        if row >= N || col >= N {
            return None;
        }
        self.cells[Self::idx(row, col)]
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        row < N && col < N && self.cells[Self::idx(row, col)].is_none()
    }

    /// Write a mark without any rule checks. Callers validate first.
    pub(crate) fn set(&mut self, (row, col): Point, mark: Option<Player>) {
        self.cells[Self::idx(row, col)] = mark;
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [None; CELLS];
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_empty_at(row, col))
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    pub fn has_line(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.get(r, c) == Some(player)))
    }

    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&p| self.has_line(p))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = match self.get(row, col) {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
