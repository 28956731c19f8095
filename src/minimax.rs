//! Exhaustive minimax search for the engine's move.
//!
//! The engine always plays O and is always the maximizing side. Terminal
//! positions score [`WIN_SCORE`] when O has a line, [`LOSS_SCORE`] when X
//! has one, and [`DRAW_SCORE`] for a full board. There is no pruning and
//! scores are not discounted by depth.
//!
//! Candidates are tried in row-major order and the first one with the
//! highest score is chosen.

use tracing::debug;

use crate::board::{Board, Point};
use crate::constants::{AI_PLAYER, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
use crate::game::Game;

/// Reasons the engine cannot produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    /// Search was asked for while X is to move.
    #[display("AI can only make moves for player 'O'.")]
    InvalidPlayer,

    /// O is to move but the board has no empty cell.
    #[display("no empty cell left to play")]
    NoMovesAvailable,
}

/// A candidate move and its minimax value for O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub point: Point,
    pub score: i32,
}

/// Score every empty cell for O, in row-major order.
///
/// The game itself is not modified; the search works on a private copy of
/// the board and undoes each speculative mark before trying the next.
pub fn score_moves(game: &Game) -> Result<Vec<ScoredMove>, SearchError> {
    if game.current_player() != AI_PLAYER {
        return Err(SearchError::InvalidPlayer);
    }

    let mut board = *game.board();
    let mut nodes = 0u64;
    let candidates: Vec<Point> = board.empty_cells().collect();
    let mut scored = Vec::with_capacity(candidates.len());

    for pt in candidates {
        board.set(pt, Some(AI_PLAYER));
        let score = minimax(&mut board, false, &mut nodes);
        board.set(pt, None);
        scored.push(ScoredMove { point: pt, score });
    }

    debug!(candidates = scored.len(), nodes, "minimax search finished");
    Ok(scored)
}

/// Pick the engine's move for the current position.
///
/// Fails with [`SearchError::InvalidPlayer`] unless O is to move.
pub fn best_move(game: &Game) -> Result<Point, SearchError> {
    let scored = score_moves(game)?;

    let mut best: Option<ScoredMove> = None;
    for candidate in scored {
        // Strictly greater: the earliest maximal cell wins ties.
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(SearchError::NoMovesAvailable)?;
    debug!(row = best.point.0, col = best.point.1, score = best.score, "best move");
    Ok(best.point)
}

/// Static value of a terminal position, or `None` if play continues.
fn terminal_score(board: &Board) -> Option<i32> {
    if board.has_line(AI_PLAYER) {
        Some(WIN_SCORE)
    } else if board.has_line(AI_PLAYER.opponent()) {
        Some(LOSS_SCORE)
    } else if board.is_full() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

/// Minimax value of `board` with `maximizing` telling whether O moves next.
///
/// Every mark placed here is removed again before returning, so `board` is
/// unchanged on exit.
fn minimax(board: &mut Board, maximizing: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;

    if let Some(score) = terminal_score(board) {
        return score;
    }

    let mover = if maximizing {
        AI_PLAYER
    } else {
        AI_PLAYER.opponent()
    };
    let moves: Vec<Point> = board.empty_cells().collect();

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pt in moves {
        board.set(pt, Some(mover));
        let score = minimax(board, !maximizing, nodes);
        board.set(pt, None);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// True when O is to move and the game is not over.
pub fn is_engine_turn(game: &Game) -> bool {
    game.current_player() == AI_PLAYER && !game.is_over()
}
