//! Tic-tac-toe with an exhaustive minimax opponent.
//!
//! ## Usage
//!
//! - `tictactoe-minimax` - Play against the engine (same as `play`)
//! - `tictactoe-minimax play` - Play X against the engine's O
//! - `tictactoe-minimax shell` - Start the text command protocol on stdio
//! - `tictactoe-minimax demo` - Pit the engine against a random opponent
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` or `-v`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tictactoe_minimax::board::Player;
use tictactoe_minimax::game::{Game, Outcome};
use tictactoe_minimax::minimax::{best_move, is_engine_turn};
use tictactoe_minimax::shell::Engine;

/// Tic-tac-toe against an exhaustive minimax engine
#[derive(Parser)]
#[command(name = "tictactoe-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play X against the engine on the terminal
    Play,
    /// Start the line-oriented text protocol on stdin/stdout
    Shell,
    /// Run the engine against a random opponent and report the tally
    Demo {
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: u32,
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Shell) => {
            let mut engine = Engine::new();
            engine.run(io::stdin().lock(), io::stdout())
        }
        Some(Commands::Demo { games, seed }) => run_demo(games, seed),
        Some(Commands::Play) | None => run_interactive(),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_interactive() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut game = Game::new();

    println!("You are X. Enter moves as `row col` (0-2).\n");

    while !game.is_over() {
        println!("{}", game.board());

        if is_engine_turn(&game) {
            let (row, col) = best_move(&game)?;
            commit(&mut game, row, col)?;
            println!("O plays {row} {col}\n");
            continue;
        }

        print!("X> ");
        stdout.flush().context("failed to flush prompt")?;
        let Some(line) = lines.next() else {
            info!("input closed before the game ended");
            return Ok(());
        };
        let line = line.context("failed to read move")?;

        match parse_move(&line) {
            Some((row, col)) if game.make_move(row, col) => game.switch_player(),
            Some(_) => println!("That cell is taken or off the board.\n"),
            None => println!("Expected two numbers, like `1 2`.\n"),
        }
    }

    println!("{}", game.board());
    match game.outcome() {
        Outcome::Win(Player::X) => println!("You win."),
        Outcome::Win(Player::O) => println!("O wins."),
        _ => println!("Draw."),
    }
    Ok(())
}

fn parse_move(line: &str) -> Option<(i32, i32)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

/// Play a searched move and pass the turn.
fn commit(game: &mut Game, row: usize, col: usize) -> Result<()> {
    let (r, c) = (i32::try_from(row)?, i32::try_from(col)?);
    if !game.make_move(r, c) {
        bail!("engine chose an unplayable cell ({row}, {col})");
    }
    game.switch_player();
    Ok(())
}

fn run_demo(games: u32, seed: u64) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let (mut wins, mut draws, mut losses) = (0u32, 0u32, 0u32);

    for n in 0..games {
        let mut game = Game::new();
        while !game.is_over() {
            if is_engine_turn(&game) {
                let (row, col) = best_move(&game)?;
                commit(&mut game, row, col)?;
            } else {
                let open: Vec<_> = game.board().empty_cells().collect();
                let (row, col) = open[rng.usize(..open.len())];
                commit(&mut game, row, col)?;
            }
        }

        let outcome = game.outcome();
        debug!(game = n, ?outcome, "demo game finished");
        match outcome {
            Outcome::Win(Player::O) => wins += 1,
            Outcome::Win(Player::X) => losses += 1,
            _ => draws += 1,
        }
    }

    println!("Engine (O) vs random (X), {games} games, seed {seed}");
    println!("  wins:   {wins}");
    println!("  draws:  {draws}");
    println!("  losses: {losses}");
    Ok(())
}
