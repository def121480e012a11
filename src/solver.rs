//! Boundary entry point: validate raw input, search, and report the result.

use crate::constants::WIN_SCORE;
use crate::eval::{Evaluator, Heuristic};
use crate::position::{InputError, Player, Position};
use crate::search::{Algorithm, SearchResult, best_move_with};

/// Result of [`solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// X's best successor.
    Move {
        /// Board after the move, as 24 markers
        board: String,
        /// (X, O) pieces still to place after the move
        to_place: (u8, u8),
        /// Search score of the move
        score: i32,
        /// Move notation, e.g. `d2` or `a1-a4xg7`
        notation: String,
    },
    /// X has already lost: it is down to two pieces with none to place, or it
    /// has no legal move.
    NoMove { score: i32 },
}

impl Solution {
    fn from_search(result: &SearchResult) -> Self {
        match &result.best {
            Some(mv) => Solution::Move {
                board: mv.position.markers(),
                to_place: mv.position.to_place_pair(),
                score: result.score,
                notation: mv.to_string(),
            },
            None => Solution::NoMove {
                score: result.score,
            },
        }
    }
}

/// Find X's best move for a board given in the boundary encoding.
///
/// `board` holds 24 markers and `to_place` the (X, O) pieces still to place.
/// Input is rejected before any search happens. A board where X is already
/// lost yields [`Solution::NoMove`] without searching.
pub fn solve(
    board: &str,
    to_place: (i64, i64),
    algorithm: Algorithm,
    depth: u32,
) -> Result<Solution, InputError> {
    solve_with(&Heuristic, board, to_place, algorithm, depth)
}

/// [`solve`] with a caller-supplied evaluator.
pub fn solve_with<E: Evaluator + ?Sized>(
    eval: &E,
    board: &str,
    to_place: (i64, i64),
    algorithm: Algorithm,
    depth: u32,
) -> Result<Solution, InputError> {
    if depth == 0 {
        return Err(InputError::ZeroDepth);
    }
    let pos = Position::parse(board, to_place)?;
    if pos.is_reduced(Player::X) {
        return Ok(Solution::NoMove { score: -WIN_SCORE });
    }
    let result = best_move_with(eval, &pos, true, depth, algorithm);
    Ok(Solution::from_search(&result))
}
