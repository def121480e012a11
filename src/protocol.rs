//! Line-oriented text protocol for driving the engine from another program.
//!
//! The format follows GTP conventions: each input line is an optional numeric
//! id, a command, and its arguments. Responses start with `=` on success or
//! `?` on failure, followed by the id (if any), the message, and a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the command loop
//! - `clear_board` - Reset to the empty board with 9 pieces each to place
//! - `setboard <24 markers> <x> <o>` - Set the board and pieces to place
//! - `getboard` - Return the board markers and pieces to place
//! - `algorithm <minimax|alphabeta>` - Select the search variant
//! - `depth <n>` - Set the search depth
//! - `play <x|0> <move>` - Play a move given in notation (`d2`, `a1-a4`, `d2xa4`)
//! - `genmove <x|0>` - Search, play, and return the best move (or `none`)
//! - `evaluate` - Return the heuristic score of the current board
//! - `showboard` - Return a diagram of the current board
//!
//! ## Example
//!
//! ```ignore
//! use morris_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow, bail, ensure};
use log::{info, warn};

use crate::constants::DEFAULT_DEPTH;
use crate::eval::evaluate;
use crate::movegen::generate_moves;
use crate::position::{Player, Position};
use crate::search::{Algorithm, best_move};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "algorithm",
    "clear_board",
    "depth",
    "evaluate",
    "genmove",
    "getboard",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game position
    pos: Position,
    /// Search variant used by `genmove`
    algorithm: Algorithm,
    /// Search depth used by `genmove`
    depth: u32,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create a new engine with default settings.
    pub fn new() -> Self {
        Self::with_search(Algorithm::default(), DEFAULT_DEPTH)
    }

    /// Create a new engine with a given search variant and depth.
    pub fn with_search(algorithm: Algorithm, depth: u32) -> Self {
        Self {
            pos: Position::new(),
            algorithm,
            depth,
        }
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            info!("> {line}");

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            let response = match self.execute(&command, args) {
                Ok(message) => format!("={id_str} {message}"),
                Err(err) => {
                    warn!("{command} failed: {err:#}");
                    format!("?{id_str} {err:#}")
                }
            };
            info!("< {response}");

            writeln!(output, "{response}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return the response message.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = arg(args, 0)?.to_lowercase();
                Ok(KNOWN_COMMANDS.contains(&cmd.as_str()).to_string())
            }

            "quit" => Ok(String::new()),

            "clear_board" => {
                self.pos = Position::new();
                Ok(String::new())
            }

            "setboard" => {
                let board = arg(args, 0)?;
                let x: i64 = arg(args, 1)?.parse().context("invalid count for x")?;
                let o: i64 = arg(args, 2)?.parse().context("invalid count for 0")?;
                self.pos = Position::parse(board, (x, o)).context("invalid board")?;
                Ok(String::new())
            }

            "getboard" => {
                let (x, o) = self.pos.to_place_pair();
                Ok(format!("{} {x} {o}", self.pos.markers()))
            }

            "algorithm" => {
                self.algorithm = arg(args, 0)?
                    .parse::<Algorithm>()
                    .map_err(anyhow::Error::msg)?;
                Ok(String::new())
            }

            "depth" => {
                let depth: u32 = arg(args, 0)?.parse().context("invalid depth")?;
                ensure!(depth > 0, "depth must be positive");
                self.depth = depth;
                Ok(String::new())
            }

            "play" => {
                let player = player_arg(args)?;
                let notation = arg(args, 1)?.to_lowercase();
                let mv = generate_moves(&self.pos, player)
                    .into_iter()
                    .find(|m| m.to_string() == notation)
                    .ok_or_else(|| anyhow!("illegal move {notation}"))?;
                self.pos = mv.position;
                Ok(String::new())
            }

            "genmove" => {
                let player = player_arg(args)?;
                let result = best_move(&self.pos, player == Player::X, self.depth, self.algorithm);
                match result.best {
                    Some(mv) => {
                        self.pos = mv.position;
                        Ok(mv.to_string())
                    }
                    None => Ok("none".to_string()),
                }
            }

            "evaluate" => Ok(evaluate(&self.pos).to_string()),

            "showboard" => Ok(format!("\n{}", self.pos)),

            _ => bail!("unknown command: {command}"),
        }
    }
}

fn arg<'a>(args: &[&'a str], i: usize) -> Result<&'a str> {
    args.get(i).copied().context("missing argument")
}

fn player_arg(args: &[&str]) -> Result<Player> {
    let s = arg(args, 0)?;
    Player::parse(s).ok_or_else(|| anyhow!("invalid player {s}"))
}
