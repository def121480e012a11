//! Morris-Rust: A Nine Men's Morris search engine.
//!
//! ## Usage
//!
//! - `morris-rust` - Play a demo game against a random opponent
//! - `morris-rust solve --board <24 markers> --to-place 9 9` - Find X's best move
//! - `morris-rust protocol` - Start the text protocol on stdin/stdout
//! - `morris-rust demo --seed 7` - Play a seeded demo game

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use morris_rust::board::str_coord;
use morris_rust::constants::{DEFAULT_DEPTH, PIECES_PER_PLAYER};
use morris_rust::eval::{Evaluator, Heuristic, WeightedFeatures};
use morris_rust::playout::self_play;
use morris_rust::position::Position;
use morris_rust::protocol::ProtocolEngine;
use morris_rust::search::Algorithm;
use morris_rust::solver::{Solution, solve_with};

/// Morris-Rust: A Nine Men's Morris search engine
#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Minimum level of log messages written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Also write debug-level logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best move for X on a given board
    Solve {
        /// 24 markers: x for X, 0 for O, comma for empty
        #[arg(long)]
        board: String,
        /// Pieces X and O still have to place
        #[arg(
            long,
            num_args = 2,
            value_names = ["X", "O"],
            allow_negative_numbers = true,
            default_values_t = [PIECES_PER_PLAYER as i64, PIECES_PER_PLAYER as i64]
        )]
        to_place: Vec<i64>,
        /// Search variant: minimax or alphabeta
        #[arg(long, default_value_t = Algorithm::AlphaBeta)]
        algorithm: Algorithm,
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Leaf evaluator
        #[arg(long, value_enum, default_value_t = EvaluatorKind::Heuristic)]
        evaluator: EvaluatorKind,
    },
    /// Start the text protocol server on stdin/stdout
    Protocol {
        /// Search variant used by genmove
        #[arg(long, default_value_t = Algorithm::AlphaBeta)]
        algorithm: Algorithm,
        /// Search depth used by genmove
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
    },
    /// Play the engine (X) against a random opponent (O)
    Demo {
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Engine search depth
        #[arg(long, default_value_t = 2)]
        depth: u32,
        /// Stop after this many plies
        #[arg(long, default_value_t = 100)]
        max_plies: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EvaluatorKind {
    Heuristic,
    Weighted,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.log_level.into(), cli.log_file.as_ref())?;

    match cli.command {
        Some(Commands::Solve {
            board,
            to_place,
            algorithm,
            depth,
            evaluator,
        }) => {
            let eval: &dyn Evaluator = match evaluator {
                EvaluatorKind::Heuristic => &Heuristic,
                EvaluatorKind::Weighted => &WeightedFeatures,
            };
            run_solve(eval, &board, (to_place[0], to_place[1]), algorithm, depth)
        }
        Some(Commands::Protocol { algorithm, depth }) => {
            let mut engine = ProtocolEngine::with_search(algorithm, depth);
            engine.run().context("protocol I/O failed")
        }
        Some(Commands::Demo {
            seed,
            depth,
            max_plies,
        }) => {
            run_demo(seed, depth, max_plies);
            Ok(())
        }
        None => {
            run_demo(1, 2, 100);
            Ok(())
        }
    }
}

fn setup_logger(level: LevelFilter, log_file: Option<&PathBuf>) -> Result<()> {
    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    let log_dispatcher = if let Some(path) = log_file {
        let file = fern::log_file(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        log_dispatcher
            .chain(fern::Dispatch::new().level(LevelFilter::Debug).chain(file))
            .chain(fern::Dispatch::new().level(level).chain(io::stderr()))
    } else {
        log_dispatcher.level(level).chain(io::stderr())
    };

    log_dispatcher
        .apply()
        .map_err(|err| anyhow!("cannot install logger: {err}"))
}

fn run_solve(
    eval: &dyn Evaluator,
    board: &str,
    to_place: (i64, i64),
    algorithm: Algorithm,
    depth: u32,
) -> Result<()> {
    let solution = solve_with(eval, board, to_place, algorithm, depth).context("invalid input")?;

    match solution {
        Solution::Move {
            board,
            to_place,
            score,
            notation,
        } => {
            let (x, o) = (i64::from(to_place.0), i64::from(to_place.1));
            let pos = Position::parse(&board, (x, o)).context("solver returned a bad board")?;
            println!("{pos}");
            println!("Best move: {notation}");
            println!("Score: {score}");
            println!("Board: {board}");
            println!("To place: x={} 0={}", to_place.0, to_place.1);
        }
        Solution::NoMove { score } => {
            println!("No legal move for x");
            println!("Score: {score}");
        }
    }
    Ok(())
}

fn run_demo(seed: u64, depth: u32, max_plies: usize) {
    println!("Morris-Rust: Nine Men's Morris Engine\n");
    println!("x: alphabeta depth {depth}, 0: random (seed {seed})\n");

    let game = self_play(depth, Algorithm::AlphaBeta, seed, max_plies);
    for (i, pair) in game.moves.chunks(2).enumerate() {
        let line: Vec<String> = pair.iter().map(|m| m.to_string()).collect();
        println!("{:3}. {}", i + 1, line.join(" "));
    }

    println!("\n{}", game.position);
    match game.winner {
        Some(winner) => println!("Winner: {winner} after {} plies", game.moves.len()),
        None => println!("No result after {} plies", game.moves.len()),
    }
    if let Some(last) = game.moves.last() {
        println!("Last move landed on {}", str_coord(last.to));
    }
}
