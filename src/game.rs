//! Game state: the board plus whose turn it is.
//!
//! This module provides the rules layer on top of [`Board`]:
//! - Move validation with bounds checking on signed coordinates
//! - Placing the current player's mark
//! - Explicit turn switching
//! - Win and draw detection
//!
//! Placing a mark never changes the current player. Callers sequence a turn
//! as `make_move` followed by `switch_player`.

use tracing::trace;

use crate::board::{Board, Player, Point};
use crate::constants::{FIRST_PLAYER, N};

/// How a game stands after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

/// A tic-tac-toe game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Player,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: FIRST_PLAYER,
        }
    }

    /// Clear the board and hand the move back to X.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = FIRST_PLAYER;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// True if `(row, col)` is on the board and empty.
    pub fn is_valid_move(&self, row: i32, col: i32) -> bool {
        to_point(row, col).is_some_and(|(r, c)| self.board.is_empty_at(r, c))
    }

    /// Mark `(row, col)` for the current player.
    ///
    /// Returns false and leaves the game untouched if the move is not valid.
    pub fn make_move(&mut self, row: i32, col: i32) -> bool {
        match to_point(row, col) {
            Some(pt) if self.board.is_empty_at(pt.0, pt.1) => {
                self.board.set(pt, Some(self.current));
                trace!(player = %self.current, row, col, "placed mark");
                true
            }
            _ => false,
        }
    }

    pub fn switch_player(&mut self) {
        self.current = self.current.opponent();
    }

    pub fn is_winner(&self, player: Player) -> bool {
        self.board.has_line(player)
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(p) => Outcome::Win(p),
            None if self.is_board_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }
}

/// Convert signed coordinates to a board point, rejecting anything off the board.
fn to_point(row: i32, col: i32) -> Option<Point> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    (row < N && col < N).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_point() {
        assert_eq!(to_point(0, 2), Some((0, 2)));
        assert_eq!(to_point(-1, 0), None);
        assert_eq!(to_point(0, 3), None);
        assert_eq!(to_point(i32::MIN, i32::MAX), None);
    }

    #[test]
    fn test_make_move_keeps_player() {
        let mut game = Game::new();
        assert!(game.make_move(1, 1));
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.board().get(1, 1), Some(Player::X));
    }

    #[test]
    fn test_make_move_rejects_occupied() {
        let mut game = Game::new();
        assert!(game.make_move(2, 0));
        game.switch_player();
        let before = game.clone();
        assert!(!game.make_move(2, 0));
        assert_eq!(game, before);
    }

    #[test]
    fn test_outcome() {
        let mut game = Game::new();
        assert_eq!(game.outcome(), Outcome::InProgress);
        for col in 0..3 {
            game.make_move(0, col);
        }
        assert_eq!(game.outcome(), Outcome::Win(Player::X));
        assert!(game.is_over());
    }

    #[test]
    fn test_draw_outcome() {
        // X O X / X O O / O X X
        let mut game = Game::new();
        let xs = [(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)];
        let os = [(0, 1), (1, 1), (1, 2), (2, 0)];
        for (r, c) in xs {
            assert!(game.make_move(r, c));
        }
        game.switch_player();
        for (r, c) in os {
            assert!(game.make_move(r, c));
        }
        assert_eq!(game.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new();
        game.make_move(0, 0);
        game.switch_player();
        game.reset();
        assert_eq!(game, Game::new());
    }
}
