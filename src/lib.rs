//! Tic-tac-toe with an exhaustive minimax opponent.
//!
//! X always moves first; the engine always plays O.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, winning lines, scores, engine identity
//! - [`board`] - The 3x3 grid and line detection
//! - [`game`] - Game state, move validation, turn switching
//! - [`minimax`] - Full-depth minimax search for O's move
//! - [`shell`] - Line-oriented text protocol for driving a game
//!
//! ## Example
//!
//! ```
//! use tictactoe_minimax::game::Game;
//! use tictactoe_minimax::minimax::best_move;
//!
//! let mut game = Game::new();
//! assert!(game.make_move(0, 0));
//! game.switch_player();
//! assert!(game.make_move(1, 1));
//! game.switch_player();
//! assert!(game.make_move(0, 1));
//! game.switch_player();
//!
//! // O blocks the top row.
//! assert_eq!(best_move(&game), Ok((0, 2)));
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod minimax;
pub mod shell;
