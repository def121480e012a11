//! Legal move generation for the placing, flying, and moving phases.
//!
//! Moves are produced as fully resolved successor positions. A placement or
//! relocation that closes a mill branches into one successor per removable
//! opponent piece, so a single "move" on the board may yield several entries.
//!
//! Ordering is deterministic and significant for search tie-breaks:
//! source point ascending (outer), destination ascending (inner), capture
//! target ascending (innermost).

use std::fmt;

use crate::board::str_coord;
use crate::position::{Phase, Player, Point, Position};
use crate::topology::topology;

/// A legal move and the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Position after the move (and capture, if any)
    pub position: Position,
    /// Player who moved
    pub player: Player,
    /// Source point, `None` for a placement
    pub from: Option<Point>,
    /// Destination point
    pub to: Point,
    /// Opponent piece removed after closing a mill
    pub capture: Option<Point>,
}

impl Move {
    /// Whether the move removed an opponent piece.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// Notation: `d2` (placement), `a1-a4` (slide or fly), with `xg7` appended
/// when a piece is captured.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{}-", str_coord(from))?;
        }
        write!(f, "{}", str_coord(self.to))?;
        if let Some(cap) = self.capture {
            write!(f, "x{}", str_coord(cap))?;
        }
        Ok(())
    }
}

/// Generate every legal successor of `pos` for `player`.
///
/// The phase is chosen from `player`'s counters: placing while pieces remain
/// to be placed, flying with three pieces or fewer on the board, otherwise
/// moving along board lines.
pub fn generate_moves(pos: &Position, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();

    match pos.phase(player) {
        Phase::Placing => {
            for to in pos.empty_points() {
                let mut next = *pos;
                next.set(to, Some(player));
                next.take_piece(player);
                push_with_captures(&mut moves, next, player, None, to);
            }
        }
        Phase::Flying => {
            for from in pos.points_of(player) {
                for to in pos.empty_points() {
                    push_relocation(&mut moves, pos, player, from, to);
                }
            }
        }
        Phase::Moving => {
            for from in pos.points_of(player) {
                for &to in topology().adjacent(from) {
                    if pos.get(to).is_none() {
                        push_relocation(&mut moves, pos, player, from, to);
                    }
                }
            }
        }
    }

    moves
}

fn push_relocation(moves: &mut Vec<Move>, pos: &Position, player: Player, from: Point, to: Point) {
    let mut next = *pos;
    next.set(from, None);
    next.set(to, Some(player));
    push_with_captures(moves, next, player, Some(from), to);
}

/// Push `next`, or one capture variant of it per removable opponent piece if
/// the piece on `to` closed a mill.
fn push_with_captures(
    moves: &mut Vec<Move>,
    next: Position,
    player: Player,
    from: Option<Point>,
    to: Point,
) {
    let base = Move {
        position: next,
        player,
        from,
        to,
        capture: None,
    };

    if !next.is_mill(to, player) {
        moves.push(base);
        return;
    }

    let targets = removal_targets(&next, player.opponent());
    if targets.is_empty() {
        // A mill with nothing on the board to remove.
        moves.push(base);
        return;
    }

    for target in targets {
        let mut captured = next;
        captured.set(target, None);
        moves.push(Move {
            position: captured,
            capture: Some(target),
            ..base
        });
    }
}

/// Opponent pieces that may be removed after a mill, in ascending order.
///
/// Pieces inside a mill are protected unless every opponent piece is.
pub fn removal_targets(pos: &Position, opponent: Player) -> Vec<Point> {
    let pieces: Vec<Point> = pos.points_of(opponent).collect();
    let all_protected = pieces.iter().all(|&p| pos.is_mill(p, opponent));
    pieces
        .into_iter()
        .filter(|&p| all_protected || !pos.is_mill(p, opponent))
        .collect()
}

/// Count the successors [`generate_moves`] would return, without building them.
pub fn count_moves(pos: &Position, player: Player) -> usize {
    // Opponent pieces are never touched by the move itself, so the number of
    // capture variants is the same for every mill-closing move.
    let targets = removal_targets(pos, player.opponent()).len().max(1);
    let mut count = 0;

    match pos.phase(player) {
        Phase::Placing => {
            for to in pos.empty_points() {
                let mut next = *pos;
                next.set(to, Some(player));
                count += if next.is_mill(to, player) { targets } else { 1 };
            }
        }
        Phase::Flying => {
            for from in pos.points_of(player) {
                for to in pos.empty_points() {
                    count += relocation_count(pos, player, from, to, targets);
                }
            }
        }
        Phase::Moving => {
            for from in pos.points_of(player) {
                for &to in topology().adjacent(from) {
                    if pos.get(to).is_none() {
                        count += relocation_count(pos, player, from, to, targets);
                    }
                }
            }
        }
    }

    count
}

#[inline]
fn relocation_count(pos: &Position, player: Player, from: Point, to: Point, targets: usize) -> usize {
    let mut next = *pos;
    next.set(from, None);
    next.set(to, Some(player));
    if next.is_mill(to, player) { targets } else { 1 }
}
