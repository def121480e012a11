//! Morris-Rust: A Nine Men's Morris search engine.
//!
//! This crate finds the best move for the first player (X) in Nine Men's
//! Morris using minimax search, with or without alpha-beta pruning, over a
//! static heuristic evaluation.
//!
//! ## Modules
//!
//! - [`constants`] - Piece counts, score bounds and evaluation weights
//! - [`topology`] - The 24 points, their adjacency and the 16 mills
//! - [`position`] - Board state, players and input validation
//! - [`board`] - Coordinates and text diagrams
//! - [`movegen`] - Legal successor generation, including captures
//! - [`eval`] - Heuristic and feature-blend evaluators
//! - [`search`] - Minimax and alpha-beta tree search
//! - [`solver`] - Validated entry point over the 24-marker board encoding
//! - [`protocol`] - Line-oriented text protocol
//! - [`playout`] - Engine-versus-random games
//!
//! ## Example
//!
//! ```
//! use morris_rust::search::Algorithm;
//! use morris_rust::solver::{Solution, solve};
//!
//! let board = ",".repeat(24);
//! let solution = solve(&board, (9, 9), Algorithm::AlphaBeta, 2).unwrap();
//! if let Solution::Move { notation, to_place, .. } = solution {
//!     assert_eq!(to_place, (8, 9));
//!     println!("Best move: {notation}");
//! }
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod movegen;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod search;
pub mod solver;
pub mod topology;
