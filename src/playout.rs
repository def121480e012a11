//! Engine-versus-random games.
//!
//! A playout pits the search (playing X) against an opponent that picks a
//! uniformly random legal move (playing O). Games are seeded, so a seed
//! always replays the same game.

use log::debug;

use crate::movegen::{Move, generate_moves};
use crate::position::{Player, Position};
use crate::search::{Algorithm, best_move};

/// A finished (or truncated) game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Moves in order, X first
    pub moves: Vec<Move>,
    /// Final position
    pub position: Position,
    /// Winner, or `None` if the ply limit was reached first
    pub winner: Option<Player>,
}

/// Pick a random legal move for `player`.
pub fn random_move(pos: &Position, player: Player, rng: &mut fastrand::Rng) -> Option<Move> {
    let moves = generate_moves(pos, player);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Check whether `to_move` has lost in `pos`.
///
/// A player loses when reduced to two pieces with none left to place, or when
/// it has no legal move on its turn.
pub fn has_lost(pos: &Position, to_move: Player) -> bool {
    pos.is_reduced(to_move) || generate_moves(pos, to_move).is_empty()
}

/// Play the engine (X) against a random opponent (O) from the initial position.
pub fn self_play(depth: u32, algorithm: Algorithm, seed: u64, max_plies: usize) -> GameRecord {
    play_from(Position::new(), depth, algorithm, seed, max_plies)
}

/// Play the engine (X) against a random opponent (O) from `start`, X to move.
pub fn play_from(
    start: Position,
    depth: u32,
    algorithm: Algorithm,
    seed: u64,
    max_plies: usize,
) -> GameRecord {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut pos = start;
    let mut moves = Vec::new();
    let mut to_move = Player::X;
    let mut winner = None;

    while moves.len() < max_plies {
        if has_lost(&pos, to_move) {
            winner = Some(to_move.opponent());
            break;
        }

        let mv = match to_move {
            Player::X => best_move(&pos, true, depth, algorithm).best,
            Player::O => random_move(&pos, to_move, &mut rng),
        };
        // has_lost() guarantees a legal move exists.
        let Some(mv) = mv else { break };

        debug!("ply {}: {to_move} {mv}", moves.len() + 1);
        pos = mv.position;
        moves.push(mv);
        to_move = to_move.opponent();
    }

    GameRecord {
        moves,
        position: pos,
        winner,
    }
}
