//! Minimax game-tree search with optional alpha-beta pruning.
//!
//! The search is a depth-first recursion over owned [`Position`] values:
//! - At depth 0 the position is scored by an [`Evaluator`]
//! - A side with no legal move has lost (`-WIN_SCORE` for X, `+WIN_SCORE` for O)
//! - Otherwise every successor from [`generate_moves`] is searched one ply
//!   deeper with the other side to move
//!
//! Ties keep the move generated first, and pruning only skips the remaining
//! siblings of the frame where the cutoff happens, so both algorithms return
//! the same score and the same move for a given depth.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::constants::{INF, WIN_SCORE};
use crate::eval::{Evaluator, Heuristic};
use crate::movegen::{Move, generate_moves};
use crate::position::{Player, Position};

/// Tree search variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Plain minimax, every node expanded
    Minimax,
    /// Minimax with alpha-beta cutoffs
    #[default]
    AlphaBeta,
}

impl Algorithm {
    /// Whether this variant prunes.
    #[inline]
    pub fn uses_pruning(self) -> bool {
        self == Algorithm::AlphaBeta
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minmax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            _ => Err(format!("unknown algorithm {s:?} (expected minimax or alphabeta)")),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Minimax value of the root position
    pub score: i32,
    /// Best move for the side to move, `None` at depth 0 or when it has no move
    pub best: Option<Move>,
    /// Number of positions visited, leaves included
    pub nodes: u64,
}

/// Search `pos` with the default [`Heuristic`] evaluator.
///
/// `maximizer_to_move` selects X (true) or O (false) as the side to move.
pub fn best_move(pos: &Position, maximizer_to_move: bool, depth: u32, algorithm: Algorithm) -> SearchResult {
    best_move_with(&Heuristic, pos, maximizer_to_move, depth, algorithm)
}

/// Search `pos` with any evaluator.
pub fn best_move_with<E: Evaluator + ?Sized>(
    eval: &E,
    pos: &Position,
    maximizer_to_move: bool,
    depth: u32,
    algorithm: Algorithm,
) -> SearchResult {
    let mut search = Search {
        eval,
        pruning: algorithm.uses_pruning(),
        root_depth: depth,
        nodes: 0,
    };
    let (score, best) = search.minimax(pos, depth, -INF, INF, maximizer_to_move);

    debug!(
        "{algorithm} depth {depth}: score {score}, best {}, {} nodes",
        best.map_or_else(|| "none".to_string(), |m| m.to_string()),
        search.nodes
    );

    SearchResult {
        score,
        best,
        nodes: search.nodes,
    }
}

/// Per-search state. Frames share only the evaluator and the node counter.
struct Search<'a, E: ?Sized> {
    eval: &'a E,
    pruning: bool,
    root_depth: u32,
    nodes: u64,
}

impl<E: Evaluator + ?Sized> Search<'_, E> {
    fn minimax(
        &mut self,
        pos: &Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (self.eval.evaluate(pos), None);
        }

        let player = if maximizing { Player::X } else { Player::O };
        let moves = generate_moves(pos, player);
        if moves.is_empty() {
            return (if maximizing { -WIN_SCORE } else { WIN_SCORE }, None);
        }

        let mut best_score = if maximizing { -INF } else { INF };
        let mut best = None;

        for mv in moves {
            let (score, _) = self.minimax(&mv.position, depth - 1, alpha, beta, !maximizing);
            if depth == self.root_depth {
                trace!("{mv}: {score}");
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best = Some(mv);
                    if self.pruning {
                        alpha = alpha.max(best_score);
                        if beta <= alpha {
                            break;
                        }
                    }
                }
            } else if score < best_score {
                best_score = score;
                best = Some(mv);
                if self.pruning {
                    beta = beta.min(best_score);
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }

        (best_score, best)
    }
}
