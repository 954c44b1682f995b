//! go-rules: a Go rules engine.
//!
//! ## Usage
//!
//! - `go-rules` - Show a demo
//! - `go-rules console` - Read commands from stdin
//! - `go-rules random` - Play a random game and print the result

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use go_rules::console::Console;
use go_rules::constants::{DEFAULT_SIZE, PLAYOUT_LEN_FACTOR, STANDARD_SIZES};
use go_rules::playout::random_game;
use go_rules::{Color, Game};

/// go-rules: legal moves, captures and self-capture checks for Go
#[derive(Parser)]
#[command(name = "go-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (N x N)
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Console,
    /// Play a short scripted game
    Demo,
    /// Play a random game
    Random {
        /// Maximum number of moves (defaults to three times the board area)
        #[arg(long)]
        moves: Option<usize>,
        /// Seed for the random number generator
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if !STANDARD_SIZES.contains(&cli.size) {
        tracing::info!(size = cli.size, "non-standard board size");
    }

    match cli.command {
        Some(Commands::Console) => {
            let mut console = Console::new(cli.size)?;
            let stdin = io::stdin();
            console
                .run(stdin.lock(), io::stdout())
                .context("console I/O failed")?;
        }
        Some(Commands::Random { moves, seed }) => {
            run_random(cli.size, moves, seed)?;
        }
        Some(Commands::Demo) | None => {
            run_demo()?;
        }
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("go-rules: capture demo on a 5x5 board\n");

    let moves = [
        (1, 2, Color::Black),
        (0, 2, Color::White),
        (2, 1, Color::Black),
        (2, 0, Color::White),
        (3, 2, Color::Black),
        (4, 2, Color::White),
        (2, 3, Color::Black),
        (2, 4, Color::White),
        (0, 0, Color::Black),
        (1, 1, Color::White),
        (4, 0, Color::Black),
        (3, 1, Color::White),
        (0, 4, Color::Black),
        (1, 3, Color::White),
        (4, 4, Color::Black),
        (3, 3, Color::White),
        (0, 1, Color::Black),
    ];
    let mut game = Game::new(5)?;
    for (row, col, color) in moves {
        game.play(row, col, color)
            .with_context(|| format!("{color} at ({row}, {col})"))?;
    }
    println!("{game}");

    let captured = game.play(2, 2, Color::White)?;
    println!("White at (2,2) captures {captured} stones:");
    println!("{game}");

    // (2,1) is now surrounded by white stones.
    match game.play(2, 1, Color::Black) {
        Ok(n) => println!("Black at (2,1): captured {n}"),
        Err(e) => println!("Black at (2,1): {e}"),
    }
    println!(
        "Captures: black {}, white {}",
        game.captures(Color::Black),
        game.captures(Color::White)
    );
    game.close();
    Ok(())
}

fn run_random(size: usize, moves: Option<usize>, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let max_moves = moves.unwrap_or(size * size * PLAYOUT_LEN_FACTOR);
    let mut game = Game::new(size)?;
    let stats = random_game(&mut game, &mut rng, max_moves)?;

    println!("{game}");
    println!(
        "moves {} rejected {} captured {} (black {}, white {}){}",
        stats.moves,
        stats.rejected,
        stats.captured,
        game.captures(Color::Black),
        game.captures(Color::White),
        if stats.exhausted { ", no legal move left" } else { "" }
    );
    if let Some(board) = game.board() {
        board.validate().context("bookkeeping check failed")?;
    }
    Ok(())
}
