//! Static position evaluation.
//!
//! Two evaluators implement [`Evaluator`]:
//! - [`Heuristic`] - terminal detection plus a weighted sum of material,
//!   mills, mobility, near-mills, and blocked pieces. This is the engine's
//!   default.
//! - [`WeightedFeatures`] - a probability-style blend of five board features,
//!   rescaled to the same score range.
//!
//! Scores are from X's point of view: positive favors X, negative favors O.

use crate::constants::{
    FEATURE_BLOCKING, FEATURE_MILLS, FEATURE_PIECES, FEATURE_STRATEGIC, LOSING_PIECE_COUNT,
    STRATEGIC_POINTS, WEIGHT_BLOCKED, WEIGHT_MILLS, WEIGHT_MOBILITY, WEIGHT_PIECES,
    WEIGHT_POTENTIAL_MILLS, WIN_SCORE,
};
use crate::movegen::count_moves;
use crate::position::{Player, Point, Position};
use crate::topology::topology;

/// Scores a position for the search.
pub trait Evaluator {
    /// Score `pos` from X's point of view.
    fn evaluate(&self, pos: &Position) -> i32;
}

/// The default evaluator. See [`evaluate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Heuristic;

impl Evaluator for Heuristic {
    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        evaluate(pos)
    }
}

/// Raw (X, O) feature counts behind the heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terms {
    pub pieces: (usize, usize),
    pub mills: (usize, usize),
    pub mobility: (usize, usize),
    pub potential_mills: (usize, usize),
    pub blocked: (usize, usize),
}

impl Terms {
    /// Collect every term for both players.
    pub fn of(pos: &Position) -> Self {
        Terms {
            pieces: both(|p| pos.piece_count(p)),
            mills: both(|p| count_mills(pos, p)),
            mobility: both(|p| count_moves(pos, p)),
            potential_mills: both(|p| count_potential_mills(pos, p)),
            blocked: both(|p| count_blocked(pos, p)),
        }
    }

    /// Weighted sum of the terms. Blocked pieces count against their owner.
    pub fn score(&self) -> i32 {
        WEIGHT_PIECES * diff(self.pieces)
            + WEIGHT_MILLS * diff(self.mills)
            + WEIGHT_MOBILITY * diff(self.mobility)
            + WEIGHT_POTENTIAL_MILLS * diff(self.potential_mills)
            - WEIGHT_BLOCKED * diff(self.blocked)
    }
}

#[inline]
fn both(f: impl Fn(Player) -> usize) -> (usize, usize) {
    (f(Player::X), f(Player::O))
}

#[inline]
fn diff((x, o): (usize, usize)) -> i32 {
    x as i32 - o as i32
}

/// Heuristic score of `pos`.
///
/// Decided positions score `±WIN_SCORE`: a player with two pieces or fewer and
/// nothing left to place has lost, and so has a player with no legal move and
/// nothing left to place. X's losses are checked after O's.
pub fn evaluate(pos: &Position) -> i32 {
    let x_pieces = pos.piece_count(Player::X);
    let o_pieces = pos.piece_count(Player::O);
    let x_done = pos.to_place(Player::X) == 0;
    let o_done = pos.to_place(Player::O) == 0;

    if o_pieces <= LOSING_PIECE_COUNT && o_done {
        return WIN_SCORE;
    }
    if x_pieces <= LOSING_PIECE_COUNT && x_done {
        return -WIN_SCORE;
    }

    let terms = Terms::of(pos);
    if terms.mobility.1 == 0 && o_done {
        return WIN_SCORE;
    }
    if terms.mobility.0 == 0 && x_done {
        return -WIN_SCORE;
    }

    terms.score()
}

/// Number of distinct completed mills owned by `player`.
pub fn count_mills(pos: &Position, player: Player) -> usize {
    let mut counted: Vec<[Point; 3]> = Vec::new();
    for mill in topology().mills() {
        if !mill.iter().all(|&p| pos.get(p) == Some(player)) {
            continue;
        }
        let mut key = *mill;
        key.sort_unstable();
        if !counted.contains(&key) {
            counted.push(key);
        }
    }
    counted.len()
}

/// Lines holding two `player` pieces and one empty point.
pub fn count_potential_mills(pos: &Position, player: Player) -> usize {
    topology()
        .mills()
        .iter()
        .filter(|mill| {
            let own = mill.iter().filter(|&&p| pos.get(p) == Some(player)).count();
            let empty = mill.iter().filter(|&&p| pos.get(p).is_none()).count();
            own == 2 && empty == 1
        })
        .count()
}

/// `player`'s pieces with no empty neighbor.
pub fn count_blocked(pos: &Position, player: Player) -> usize {
    pos.points_of(player)
        .filter(|&pt| !pos.can_move(pt, player))
        .count()
}

/// Feature-blend evaluator producing a win probability for X.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedFeatures;

impl WeightedFeatures {
    /// Estimated probability that X wins, in `[0, 1]`.
    ///
    /// Each feature is X's share of the (X, O) pair, or one half when neither
    /// side has any. Completed mills only count in X's favor when X has more.
    pub fn win_probability(&self, pos: &Position) -> f64 {
        let mut mills = (0, 0);
        let mut potential = (0, 0);
        let mut blocks = (0, 0);

        for mill in topology().mills() {
            let x = mill.iter().filter(|&&p| pos.get(p) == Some(Player::X)).count();
            let o = mill.iter().filter(|&&p| pos.get(p) == Some(Player::O)).count();
            let empty = 3 - x - o;

            if x == 3 {
                mills.0 += 1;
            } else if o == 3 {
                mills.1 += 1;
            }
            if x == 2 && empty == 1 {
                potential.0 += 1;
            } else if o == 2 && empty == 1 {
                potential.1 += 1;
            }
            if x == 1 && o == 2 {
                blocks.0 += 1;
            } else if o == 1 && x == 2 {
                blocks.1 += 1;
            }
        }

        let pieces = (pos.piece_count(Player::X), pos.piece_count(Player::O));
        let strategic = (
            STRATEGIC_POINTS.iter().filter(|&&p| pos.get(p) == Some(Player::X)).count(),
            STRATEGIC_POINTS.iter().filter(|&&p| pos.get(p) == Some(Player::O)).count(),
        );

        let mill_score = if mills.0 > mills.1 { share(mills) } else { 0.5 };
        let mill_combined = (mill_score + share(potential)) / 2.0;

        FEATURE_MILLS * mill_combined
            + FEATURE_BLOCKING * share(blocks)
            + FEATURE_PIECES * share(pieces)
            + FEATURE_STRATEGIC * share(strategic)
    }
}

impl Evaluator for WeightedFeatures {
    /// Rescales the win probability to `[-WIN_SCORE, WIN_SCORE]`.
    fn evaluate(&self, pos: &Position) -> i32 {
        let p = self.win_probability(pos);
        ((p - 0.5) * 2.0 * WIN_SCORE as f64).round() as i32
    }
}

fn share((x, o): (usize, usize)) -> f64 {
    if x + o > 0 {
        x as f64 / (x + o) as f64
    } else {
        0.5
    }
}
