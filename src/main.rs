//! Morris-Rust: play Three Men's Morris against the computer.
//!
//! ## Usage
//!
//! - `morris-rust` - Play a game in the terminal
//! - `morris-rust play --computer-first` - Let the computer open
//! - `morris-rust analyze --board "XX./.O./..."` - Search a position
//! - `morris-rust demo --games 20` - Engine against a random mover

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use morris_rust::constants::MAX_DEPTH;
use morris_rust::playout::run_series;
use morris_rust::position::GameState;
use morris_rust::search::Searcher;
use morris_rust::session::{Session, SessionConfig};

/// Morris-Rust: a Three Men's Morris engine
#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the computer on stdin/stdout
    Play {
        /// Search depth in plies
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: u32,
        /// Let the computer move first
        #[arg(long)]
        computer_first: bool,
        /// Start from a board diagram such as "XX./.O./..."
        #[arg(long)]
        board: Option<String>,
    },
    /// Print the computer's best move for a position
    Analyze {
        /// Board diagram, rows separated by '/'
        #[arg(long)]
        board: String,
        /// Search depth in plies
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: u32,
    },
    /// Let the engine play a series of games against a random mover
    Demo {
        /// Number of games
        #[arg(short, long, default_value_t = 10)]
        games: u32,
        /// Random seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Search depth in plies
        #[arg(short, long, default_value_t = MAX_DEPTH)]
        depth: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            depth,
            computer_first,
            board,
        }) => play(depth, computer_first, board.as_deref()),
        Some(Commands::Analyze { board, depth }) => analyze(&board, depth),
        Some(Commands::Demo { games, seed, depth }) => demo(games, seed, depth),
        None => play(MAX_DEPTH, false, None),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_board(diagram: &str) -> Result<GameState> {
    diagram
        .parse()
        .with_context(|| format!("invalid board {diagram:?}"))
}

fn play(depth: u32, computer_first: bool, board: Option<&str>) -> Result<()> {
    let state = match board {
        Some(diagram) => parse_board(diagram)?,
        None => GameState::new(),
    };
    let config = SessionConfig {
        max_depth: depth,
        computer_first,
    };
    let stdin = io::stdin();
    let mut session = Session::with_state(stdin.lock(), io::stdout(), config, state);
    if session.run()?.is_none() {
        println!("\nGame abandoned.");
    }
    Ok(())
}

fn analyze(board: &str, depth: u32) -> Result<()> {
    let mut state = parse_board(board)?;
    println!("{state}");
    println!("Phase: {}", state.phase());

    let mut searcher = Searcher::new(depth);
    let result = searcher.search(&mut state)?;
    match result.best {
        Some(mv) => println!("Best move: {mv}"),
        None => println!("Best move: none"),
    }
    println!("Score: {}", result.score);
    println!("Nodes: {}", result.nodes);
    Ok(())
}

fn demo(games: u32, seed: u64, depth: u32) -> Result<()> {
    println!("Morris-Rust: engine (depth {depth}) vs. random mover\n");
    let tally = run_series(seed, games, depth)?;
    println!("Games:       {}", tally.games());
    println!("Engine wins: {}", tally.engine_wins);
    println!("Random wins: {}", tally.random_wins);
    println!("Draws:       {}", tally.draws);
    Ok(())
}
