//! Nine Men's Morris position representation and queries.
//!
//! This module provides the core game state:
//! - A fixed array of 24 cells, each empty or holding a piece of one player
//! - The number of pieces each player still has to place
//! - Mill and mobility queries used by move generation and evaluation
//! - Conversion to and from the 24-marker boundary encoding
//!
//! A [`Position`] is a small `Copy` value. Every transition produces a new
//! position, so search frames never share mutable state.

use std::fmt;

use crate::constants::{
    FLYING_THRESHOLD, LOSING_PIECE_COUNT, MARKER_EMPTY, MARKER_O, MARKER_X, PIECES_PER_PLAYER,
};
use crate::topology::{NUM_POINTS, topology};

pub use crate::topology::Point;

/// One of the two players.
///
/// X moves first and is the maximizing side; O is the minimizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Boundary marker for this player's pieces.
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Player::X => MARKER_X,
            Player::O => MARKER_O,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// Parse a player name as used by the protocol (`x`, `0`, `o`).
    pub fn parse(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Some(Player::X),
            "0" | "o" => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Which kind of move a player makes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The player still has pieces to put on empty points.
    Placing,
    /// The player has three pieces or fewer and may jump to any empty point.
    Flying,
    /// The player slides a piece to an adjacent empty point.
    Moving,
}

/// Rejected boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The board does not have exactly 24 cells.
    BoardLength(usize),
    /// A cell marker is not one of the recognized markers.
    InvalidMarker { index: usize, marker: char },
    /// A pieces-to-place counter is negative.
    NegativeCount(i64),
    /// A pieces-to-place counter exceeds the piece budget.
    TooManyToPlace(i64),
    /// The search depth must be at least one ply.
    ZeroDepth,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::BoardLength(n) => {
                write!(f, "board must have {NUM_POINTS} cells, got {n}")
            }
            InputError::InvalidMarker { index, marker } => {
                write!(f, "invalid marker {marker:?} at cell {index}")
            }
            InputError::NegativeCount(n) => write!(f, "pieces to place cannot be negative ({n})"),
            InputError::TooManyToPlace(n) => {
                write!(f, "pieces to place cannot exceed {PIECES_PER_PLAYER} ({n})")
            }
            InputError::ZeroDepth => write!(f, "search depth must be positive"),
        }
    }
}

impl std::error::Error for InputError {}

/// A Nine Men's Morris position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Board cells: `None` = empty, `Some(player)` = occupied
    cells: [Option<Player>; NUM_POINTS],
    /// Pieces still to place, indexed by player (X, O)
    to_place: [u8; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The empty board at the start of the game.
    pub fn new() -> Self {
        Self::from_parts([None; NUM_POINTS], (PIECES_PER_PLAYER, PIECES_PER_PLAYER))
    }

    /// Build a position from cells and (X, O) pieces-to-place counters.
    pub fn from_parts(cells: [Option<Player>; NUM_POINTS], to_place: (u8, u8)) -> Self {
        Position {
            cells,
            to_place: [to_place.0, to_place.1],
        }
    }

    /// Parse the boundary encoding: 24 cell markers and signed counters.
    ///
    /// ASCII whitespace in `board` is ignored. Recognized markers are `x`/`X`
    /// for X, `0`/`o`/`O` for O, and `,` or `.` for an empty point.
    pub fn parse(board: &str, to_place: (i64, i64)) -> Result<Position, InputError> {
        let markers: Vec<char> = board.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if markers.len() != NUM_POINTS {
            return Err(InputError::BoardLength(markers.len()));
        }

        let mut cells = [None; NUM_POINTS];
        for (index, (&marker, cell)) in markers.iter().zip(cells.iter_mut()).enumerate() {
            *cell = match marker {
                'x' | 'X' => Some(Player::X),
                '0' | 'o' | 'O' => Some(Player::O),
                ',' | '.' => None,
                _ => return Err(InputError::InvalidMarker { index, marker }),
            };
        }

        Ok(Self::from_parts(
            cells,
            (check_count(to_place.0)?, check_count(to_place.1)?),
        ))
    }

    /// Encode the board as 24 markers (`x`, `0`, `,`).
    pub fn markers(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or(MARKER_EMPTY, Player::marker))
            .collect()
    }

    /// The piece on `pt`, if any.
    #[inline]
    pub fn get(&self, pt: Point) -> Option<Player> {
        self.cells[pt]
    }

    #[inline]
    pub(crate) fn set(&mut self, pt: Point, cell: Option<Player>) {
        self.cells[pt] = cell;
    }

    /// Pieces `player` still has to place.
    #[inline]
    pub fn to_place(&self, player: Player) -> u8 {
        self.to_place[player.index()]
    }

    /// Both counters as (X, O).
    #[inline]
    pub fn to_place_pair(&self) -> (u8, u8) {
        (self.to_place[0], self.to_place[1])
    }

    /// Use up one piece from `player`'s placing budget.
    pub(crate) fn take_piece(&mut self, player: Player) {
        debug_assert!(self.to_place[player.index()] > 0);
        self.to_place[player.index()] -= 1;
    }

    /// Number of `player`'s pieces on the board.
    pub fn piece_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    /// Empty points in ascending order.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..NUM_POINTS).filter(move |&pt| self.cells[pt].is_none())
    }

    /// Points occupied by `player` in ascending order.
    pub fn points_of(&self, player: Player) -> impl Iterator<Item = Point> + '_ {
        (0..NUM_POINTS).filter(move |&pt| self.cells[pt] == Some(player))
    }

    /// Check whether `pt` is part of a line of three `player` pieces.
    pub fn is_mill(&self, pt: Point, player: Player) -> bool {
        topology()
            .mills_through(pt)
            .any(|mill| mill.iter().all(|&p| self.cells[p] == Some(player)))
    }

    /// Check whether `player` has a piece on `pt` with an empty neighbor.
    pub fn can_move(&self, pt: Point, player: Player) -> bool {
        self.cells[pt] == Some(player)
            && topology()
                .adjacent(pt)
                .iter()
                .any(|&adj| self.cells[adj].is_none())
    }

    /// Check whether `player` is down to two pieces with none left to place.
    pub fn is_reduced(&self, player: Player) -> bool {
        self.to_place(player) == 0 && self.piece_count(player) <= LOSING_PIECE_COUNT
    }

    /// The kind of move `player` makes from this position.
    pub fn phase(&self, player: Player) -> Phase {
        if self.to_place(player) > 0 {
            Phase::Placing
        } else if self.piece_count(player) <= FLYING_THRESHOLD {
            Phase::Flying
        } else {
            Phase::Moving
        }
    }
}

fn check_count(n: i64) -> Result<u8, InputError> {
    if n < 0 {
        Err(InputError::NegativeCount(n))
    } else if n > PIECES_PER_PLAYER as i64 {
        Err(InputError::TooManyToPlace(n))
    } else {
        Ok(n as u8)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, o) = self.to_place_pair();
        write!(f, "Position({} x:{x} 0:{o})", self.markers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = ",,,,x,0,xx0x,,0x0x,0,,,,";

    #[test]
    fn test_new_position() {
        let pos = Position::new();
        assert_eq!(pos.empty_points().count(), NUM_POINTS);
        assert_eq!(pos.to_place_pair(), (9, 9));
        assert_eq!(pos.phase(Player::X), Phase::Placing);
    }

    #[test]
    fn test_parse_and_markers_roundtrip() {
        let board = "x0,,,,,,,,,,,,,,,,,,,,0x";
        let pos = Position::parse(board, (3, 4)).unwrap();
        assert_eq!(pos.get(0), Some(Player::X));
        assert_eq!(pos.get(1), Some(Player::O));
        assert_eq!(pos.get(2), None);
        assert_eq!(pos.markers(), board);
        assert_eq!(pos.to_place_pair(), (3, 4));
    }

    #[test]
    fn test_parse_normalizes_markers() {
        let pos = Position::parse("X o O . , , , , , , , , , , , , , , , , , , , ,", (0, 0)).unwrap();
        assert_eq!(pos.get(0), Some(Player::X));
        assert_eq!(pos.get(1), Some(Player::O));
        assert_eq!(pos.get(2), Some(Player::O));
        assert_eq!(pos.get(3), None);
        assert_eq!(&pos.markers()[..4], "x00,");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            Position::parse(",,,", (0, 0)),
            Err(InputError::BoardLength(3))
        );
        assert_eq!(
            Position::parse(",,,,,q,,,,,,,,,,,,,,,,,,", (0, 0)),
            Err(InputError::InvalidMarker {
                index: 5,
                marker: 'q'
            })
        );
        let empty = ",".repeat(NUM_POINTS);
        assert_eq!(
            Position::parse(&empty, (-1, 0)),
            Err(InputError::NegativeCount(-1))
        );
        assert_eq!(
            Position::parse(&empty, (0, 10)),
            Err(InputError::TooManyToPlace(10))
        );
    }

    #[test]
    fn test_is_reduced() {
        let pos = Position::parse("xx,000,,,,,,,,,,,,,,,,,,", (0, 0)).unwrap();
        assert!(pos.is_reduced(Player::X));
        assert!(!pos.is_reduced(Player::O));
        let pos = Position::parse("xx,000,,,,,,,,,,,,,,,,,,", (1, 0)).unwrap();
        assert!(!pos.is_reduced(Player::X));
    }

    #[test]
    fn test_points_ascending() {
        let pos = Position::parse(MIXED, (0, 0)).unwrap();
        let xs: Vec<Point> = pos.points_of(Player::X).collect();
        assert_eq!(xs, vec![4, 8, 9, 11, 15, 17]);
        let os: Vec<Point> = pos.points_of(Player::O).collect();
        assert_eq!(os, vec![6, 10, 14, 16, 19]);
        assert!(pos.empty_points().eq([0, 1, 2, 3, 5, 7, 12, 13, 18, 20, 21, 22, 23]));
    }

    #[test]
    fn test_is_mill() {
        let pos = Position::parse("xxx,,,,,,,,,,,,,,,,,,,,,", (0, 0)).unwrap();
        assert!(pos.is_mill(0, Player::X));
        assert!(pos.is_mill(1, Player::X));
        assert!(pos.is_mill(2, Player::X));
        assert!(!pos.is_mill(0, Player::O));
        assert!(!pos.is_mill(9, Player::X));
    }

    #[test]
    fn test_can_move() {
        // X on 0 is surrounded by O on 1 and 9.
        let pos = Position::parse("x0,,,,,,,0,,,,,,,,,,,,,,", (0, 0)).unwrap();
        assert!(!pos.can_move(0, Player::X));
        assert!(pos.can_move(1, Player::O));
        // Not X's piece.
        assert!(!pos.can_move(1, Player::X));
        // Empty point.
        assert!(!pos.can_move(2, Player::X));
    }

    #[test]
    fn test_phase_selection() {
        let three = Position::parse("xxx,,,,,,,,,,,,,,,,,,,,,", (0, 0)).unwrap();
        assert_eq!(three.phase(Player::X), Phase::Flying);
        let four = Position::parse("xxxx,,,,,,,,,,,,,,,,,,,,", (0, 0)).unwrap();
        assert_eq!(four.phase(Player::X), Phase::Moving);
        let placing = Position::parse("xxxx,,,,,,,,,,,,,,,,,,,,", (1, 0)).unwrap();
        assert_eq!(placing.phase(Player::X), Phase::Placing);
    }

    #[test]
    fn test_take_piece() {
        let mut pos = Position::new();
        pos.take_piece(Player::O);
        assert_eq!(pos.to_place_pair(), (9, 8));
    }
}
