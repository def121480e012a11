//! Constants for piece budgets, terminal scores, and evaluation weights.
//!
//! This module contains the tunable and rule-defining parameters of the engine.
//! Board geometry (points, mills, adjacency) lives in [`crate::topology`].

// =============================================================================
// Game Rules
// =============================================================================

/// Number of pieces each player introduces during the placing phase.
pub const PIECES_PER_PLAYER: u8 = 9;

/// A player with this many pieces (or fewer) on the board may fly.
pub const FLYING_THRESHOLD: usize = 3;

/// A player reduced to this many pieces, with none left to place, has lost.
pub const LOSING_PIECE_COUNT: usize = 2;

// =============================================================================
// Search Parameters
// =============================================================================

/// Score of a decided game. Positive favors X, negative favors O.
pub const WIN_SCORE: i32 = 1000;

/// Bound used for the initial alpha/beta window. Larger than any reachable score.
pub const INF: i32 = i32::MAX;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 3;

// =============================================================================
// Heuristic Evaluation Weights
// =============================================================================

/// Weight of the on-board piece count difference.
pub const WEIGHT_PIECES: i32 = 3;

/// Weight of the completed mill count difference.
pub const WEIGHT_MILLS: i32 = 6;

/// Weight of the legal move count difference.
pub const WEIGHT_MOBILITY: i32 = 1;

/// Weight of the "two pieces and one empty point in a line" count difference.
pub const WEIGHT_POTENTIAL_MILLS: i32 = 2;

/// Weight of the blocked piece count difference.
pub const WEIGHT_BLOCKED: i32 = 1;

// =============================================================================
// Weighted-Feature Evaluation
// =============================================================================

/// Share of the combined mill and potential-mill score.
pub const FEATURE_MILLS: f64 = 0.4;

/// Share of the mill-blocking score.
pub const FEATURE_BLOCKING: f64 = 0.3;

/// Share of the piece-count score.
pub const FEATURE_PIECES: f64 = 0.2;

/// Share of the strategic-point score.
pub const FEATURE_STRATEGIC: f64 = 0.1;

/// Corners of the middle ring.
pub const STRATEGIC_POINTS: [usize; 4] = [3, 5, 18, 20];

// =============================================================================
// Boundary Markers
// =============================================================================

/// Marker for a piece of X (the maximizing player).
pub const MARKER_X: char = 'x';

/// Marker for a piece of O (the minimizing player).
pub const MARKER_O: char = '0';

/// Marker for an empty point.
pub const MARKER_EMPTY: char = ',';
