//! Constants for board geometry, search scores, and engine identity.
//!
//! The board size is fixed at 3x3; nothing in the crate is generic over it.

use crate::board::{Player, Point};

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Point; N]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

// =============================================================================
// Players
// =============================================================================

/// The player who moves first from a fresh game.
pub const FIRST_PLAYER: Player = Player::X;

/// The player the search engine plays for. It is always the maximizing side.
pub const AI_PLAYER: Player = Player::O;

// =============================================================================
// Minimax Scores
// =============================================================================

/// Terminal score when the engine's player has a complete line.
pub const WIN_SCORE: i32 = 10;

/// Terminal score when the opponent has a complete line.
pub const LOSS_SCORE: i32 = -10;

/// Terminal score for a full board without a winner.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Engine Identity
// =============================================================================

/// Name reported by the text shell.
pub const ENGINE_NAME: &str = "tictactoe-minimax";

/// Text protocol version reported by the shell.
pub const PROTOCOL_VERSION: &str = "1";
