//! Line-oriented text protocol for driving the engine.
//!
//! The protocol follows the shape of the Go Text Protocol: one command per
//! line, an optional numeric id in front, and a response of `=[id] message`
//! on success or `?[id] message` on failure, each followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Reset to an empty board with X to move
//! - `play <row> <col>` - Play a mark for the side to move, then pass the turn
//! - `genmove` - Let the engine choose and play a move for O
//! - `analyze` - List each candidate for O with its minimax score
//! - `showboard` - Print the board
//! - `current_player` - Return the side to move
//! - `result` - Return `X+`, `O+`, `draw`, or `in progress`
//!
//! ## Example
//!
//! ```
//! use tictactoe_minimax::shell::Engine;
//!
//! let mut engine = Engine::new();
//! let mut out = Vec::new();
//! engine.run("play 1 1\ngenmove\n".as_bytes(), &mut out).unwrap();
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.contains("= 0 0"));
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::game::{Game, Outcome};
use crate::minimax::{best_move, score_moves};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "clear_board",
    "current_player",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "result",
    "showboard",
    "version",
];

/// Shell state: the one game being played.
#[derive(Debug, Default)]
pub struct Engine {
    game: Game,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        info!("text shell started");

        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }

        info!("text shell stopped");
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        if end > 0
            && let Ok(id) = trimmed[..end].parse::<u32>()
        {
            return (Some(id), trimmed[end..].trim());
        }

        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing");
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let (Ok(row), Ok(col)) = (args[0].parse::<i32>(), args[1].parse::<i32>()) else {
                    return (false, "invalid coordinate".to_string());
                };
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                if !self.game.make_move(row, col) {
                    return (false, "illegal move".to_string());
                }
                self.game.switch_player();
                (true, String::new())
            }

            "genmove" => {
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                match best_move(&self.game) {
                    Ok((row, col)) => {
                        let played = match (i32::try_from(row), i32::try_from(col)) {
                            (Ok(r), Ok(c)) => self.game.make_move(r, c),
                            _ => false,
                        };
                        if !played {
                            return (false, format!("engine chose an unplayable cell ({row}, {col})"));
                        }
                        self.game.switch_player();
                        (true, format!("{row} {col}"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "analyze" => {
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                match score_moves(&self.game) {
                    Ok(scored) => {
                        let lines: Vec<String> = scored
                            .iter()
                            .map(|m| format!("{} {} {}", m.point.0, m.point.1, m.score))
                            .collect();
                        (true, lines.join("\n"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board().to_string().trim_end())),

            "current_player" => (true, self.game.current_player().to_string()),

            "result" => {
                let result = match self.game.outcome() {
                    Outcome::Win(p) => format!("{p}+"),
                    Outcome::Draw => "draw".to_string(),
                    Outcome::InProgress => "in progress".to_string(),
                };
                (true, result)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Engine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Engine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = Engine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, ENGINE_NAME);
    }

    #[test]
    fn test_known_command() {
        let mut engine = Engine::new();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["undo"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_switches_turn() {
        let mut engine = Engine::new();
        let (success, _) = engine.execute("play", &["0", "0"]);
        assert!(success);
        assert_eq!(engine.game().current_player(), Player::O);

        let (success, response) = engine.execute("play", &["0", "0"]);
        assert!(!success);
        assert_eq!(response, "illegal move");
        assert_eq!(engine.game().current_player(), Player::O);
    }

    #[test]
    fn test_play_rejects_bad_coordinates() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.execute("play", &["-1", "0"]),
            (false, "illegal move".to_string())
        );
        assert_eq!(
            engine.execute("play", &["a", "0"]),
            (false, "invalid coordinate".to_string())
        );
        assert_eq!(
            engine.execute("play", &["1"]),
            (false, "missing arguments".to_string())
        );
    }

    #[test]
    fn test_genmove_wrong_player() {
        let mut engine = Engine::new();
        let (success, response) = engine.execute("genmove", &[]);
        assert!(!success);
        assert_eq!(response, "AI can only make moves for player 'O'.");
    }

    #[test]
    fn test_genmove_blocks_row() {
        let mut engine = Engine::new();
        for (r, c) in [("0", "0"), ("1", "1"), ("0", "1")] {
            assert!(engine.execute("play", &[r, c]).0);
        }
        let (success, response) = engine.execute("genmove", &[]);
        assert!(success);
        assert_eq!(response, "0 2");
        assert_eq!(engine.game().board().get(0, 2), Some(Player::O));
        assert_eq!(engine.game().current_player(), Player::X);
    }

    #[test]
    fn test_analyze_lists_scores() {
        let mut engine = Engine::new();
        for (r, c) in [("0", "0"), ("1", "1"), ("0", "1")] {
            assert!(engine.execute("play", &[r, c]).0);
        }
        let (success, response) = engine.execute("analyze", &[]);
        assert!(success);
        let lines: Vec<&str> = response.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "0 2 0");
        assert!(lines[1..].iter().all(|l| l.ends_with(" -10")), "{response}");
        assert_eq!(lines[1], "1 0 -10");

        // Scoring does not play a move.
        assert_eq!(engine.game().current_player(), Player::O);
        assert_eq!(engine.game().board().empty_cells().count(), 6);
    }

    #[test]
    fn test_analyze_wrong_player() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.execute("analyze", &[]),
            (false, "AI can only make moves for player 'O'.".to_string())
        );
    }

    #[test]
    fn test_analyze_and_genmove_refuse_finished_game() {
        let mut engine = Engine::new();
        for (r, c) in [("0", "0"), ("1", "0"), ("0", "1"), ("1", "1"), ("0", "2")] {
            assert!(engine.execute("play", &[r, c]).0);
        }
        assert_eq!(engine.game().current_player(), Player::O);
        assert_eq!(
            engine.execute("analyze", &[]),
            (false, "game is over".to_string())
        );
        assert_eq!(
            engine.execute("genmove", &[]),
            (false, "game is over".to_string())
        );
    }

    #[test]
    fn test_showboard() {
        let mut engine = Engine::new();
        assert!(engine.execute("play", &["0", "0"]).0);
        assert!(engine.execute("play", &["2", "1"]).0);
        assert_eq!(
            engine.execute("showboard", &[]),
            (true, "\nX . .\n. . .\n. O .".to_string())
        );
    }

    #[test]
    fn test_result_and_clear() {
        let mut engine = Engine::new();
        for (r, c) in [("0", "0"), ("1", "0"), ("0", "1"), ("1", "1"), ("0", "2")] {
            assert!(engine.execute("play", &[r, c]).0);
        }
        assert_eq!(engine.execute("result", &[]), (true, "X+".to_string()));
        assert_eq!(
            engine.execute("play", &["2", "2"]),
            (false, "game is over".to_string())
        );

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.execute("result", &[]), (true, "in progress".to_string()));
        assert_eq!(engine.execute("current_player", &[]), (true, "X".to_string()));
    }

    #[test]
    fn test_run_formats_responses() {
        let mut engine = Engine::new();
        let mut out = Vec::new();
        engine
            .run("# comment\n\n7 name\nbogus\nquit\nname\n".as_bytes(), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            format!("=7 {ENGINE_NAME}\n\n? unknown command: bogus\n\n= \n\n")
        );
    }
}
