//! Integration tests for morris-rust
//!
//! End-to-end scenarios through the public API: solving boards given in the
//! 24-marker encoding, playing moves by notation, and seeded self-play.

use morris_rust::board::{parse_coord, str_coord};
use morris_rust::eval::{WeightedFeatures, evaluate};
use morris_rust::movegen::generate_moves;
use morris_rust::playout::{play_from, self_play};
use morris_rust::position::{InputError, Player, Position};
use morris_rust::search::Algorithm;
use morris_rust::solver::{Solution, solve, solve_with};

// =============================================================================
// Helper functions
// =============================================================================

const EMPTY: &str = ",,,,,,,,,,,,,,,,,,,,,,,,";

/// Unwrap a `Solution::Move` into (board, to_place, score, notation).
fn expect_move(solution: Solution) -> (String, (u8, u8), i32, String) {
    match solution {
        Solution::Move {
            board,
            to_place,
            score,
            notation,
        } => (board, to_place, score, notation),
        Solution::NoMove { score } => panic!("expected a move, got none (score {score})"),
    }
}

/// Apply moves given in notation, alternating X and O.
fn play_sequence(moves: &[&str]) -> Position {
    let mut pos = Position::new();
    let mut player = Player::X;
    for notation in moves {
        let mv = generate_moves(&pos, player)
            .into_iter()
            .find(|m| m.to_string() == *notation)
            .unwrap_or_else(|| panic!("illegal move {notation}"));
        pos = mv.position;
        player = player.opponent();
    }
    pos
}

// =============================================================================
// Solve: opening
// =============================================================================

#[test]
fn test_empty_board_depth_one() {
    let (board, to_place, score, notation) =
        expect_move(solve(EMPTY, (9, 9), Algorithm::Minimax, 1).unwrap());

    assert_eq!(to_place, (8, 9));
    assert_eq!(board.chars().filter(|&c| c == 'x').count(), 1);
    assert_eq!(board.chars().filter(|&c| c == '0').count(), 0);

    let pos = Position::parse(&board, (8, 9)).unwrap();
    assert_eq!(score, evaluate(&pos));

    // Every single placement scores 3 (one piece) plus its mobility edge, and
    // ties keep the first generated point.
    assert_eq!(score, 3);
    assert_eq!(notation, "a1");
}

#[test]
fn test_empty_board_depth_two() {
    let minimax = expect_move(solve(EMPTY, (9, 9), Algorithm::Minimax, 2).unwrap());
    let alphabeta = expect_move(solve(EMPTY, (9, 9), Algorithm::AlphaBeta, 2).unwrap());
    assert_eq!(minimax, alphabeta);
    assert_eq!(minimax.2, 0);
    assert_eq!(minimax.3, "a1");
}

#[test]
fn test_whitespace_in_board_is_ignored() {
    let spaced = ",,,,,,,, ,,,,,,,, ,,,,,,,,";
    let a = solve(spaced, (9, 9), Algorithm::AlphaBeta, 1).unwrap();
    let b = solve(EMPTY, (9, 9), Algorithm::AlphaBeta, 1).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Solve: mills and captures
// =============================================================================

#[test]
fn test_completes_mill_when_placing() {
    // X holds a1 and d1, O holds a4 and g7.
    let board = "xx,,,,,,,0,,,,,,,,,,,,,0";
    let (after, to_place, score, notation) =
        expect_move(solve(board, (5, 5), Algorithm::Minimax, 1).unwrap());

    assert_eq!(notation, "g1xa4");
    assert_eq!(after, "xxx,,,,,,,,,,,,,,,,,,,,0");
    assert_eq!(to_place, (4, 5));
    assert_eq!(score, 12);
}

#[test]
fn test_completes_mill_when_moving() {
    let board = "x,x0x0,,,,x,,,,,0,,,,,00";
    let (after, to_place, score, notation) =
        expect_move(solve(board, (0, 0), Algorithm::AlphaBeta, 1).unwrap());

    assert_eq!(notation, "d2-d1xd5");
    assert_eq!(after, "xxx0,0,,,,x,,,,,,,,,,,00");
    assert_eq!(to_place, (0, 0));
    assert_eq!(score, 2);
}

#[test]
fn test_deeper_search_keeps_mill() {
    let board = "x,x0x0,,,,x,,,,,0,,,,,00";
    for depth in [3, 4] {
        let minimax = expect_move(solve(board, (0, 0), Algorithm::Minimax, depth).unwrap());
        let alphabeta = expect_move(solve(board, (0, 0), Algorithm::AlphaBeta, depth).unwrap());
        assert_eq!(minimax, alphabeta, "depth {depth}");
        assert_eq!(minimax.3, "d2-d1xd5", "depth {depth}");
    }
}

// =============================================================================
// Solve: terminal positions and bad input
// =============================================================================

#[test]
fn test_blocked_x_has_no_move() {
    let board = "x0x,,,,,,0,,,,0,,,,,,x0x";
    let solution = solve(board, (0, 0), Algorithm::Minimax, 4).unwrap();
    assert_eq!(solution, Solution::NoMove { score: -1000 });
}

#[test]
fn test_reduced_x_has_no_move() {
    let board = "x,,,,,,,x,,,,,0,,,,0,,,0";
    let solution = solve(board, (0, 0), Algorithm::Minimax, 3).unwrap();
    assert_eq!(solution, Solution::NoMove { score: -1000 });
}

#[test]
fn test_rejected_input() {
    assert_eq!(
        solve(&EMPTY[1..], (9, 9), Algorithm::AlphaBeta, 1),
        Err(InputError::BoardLength(23))
    );
    assert_eq!(
        solve(",,,,,,,,,,,,,,,,,,,,,,,y", (9, 9), Algorithm::AlphaBeta, 1),
        Err(InputError::InvalidMarker {
            index: 23,
            marker: 'y'
        })
    );
    assert_eq!(
        solve(EMPTY, (-1, 9), Algorithm::AlphaBeta, 1),
        Err(InputError::NegativeCount(-1))
    );
    assert_eq!(
        solve(EMPTY, (9, 9), Algorithm::AlphaBeta, 0),
        Err(InputError::ZeroDepth)
    );
}

#[test]
fn test_input_error_messages() {
    let err = solve(",,,", (9, 9), Algorithm::AlphaBeta, 1).unwrap_err();
    assert_eq!(err.to_string(), "board must have 24 cells, got 3");
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(!boxed.to_string().is_empty());
}

#[test]
fn test_alternate_markers_accepted() {
    let upper = solve("XX,,,,,,,O,,,,,,,,,,,,,O", (5, 5), Algorithm::Minimax, 1).unwrap();
    let lower = solve("xx.......o.............o", (5, 5), Algorithm::Minimax, 1).unwrap();
    let plain = solve("xx,,,,,,,0,,,,,,,,,,,,,0", (5, 5), Algorithm::Minimax, 1).unwrap();
    assert_eq!(upper, plain);
    assert_eq!(lower, plain);
}

#[test]
fn test_solve_with_weighted_features() {
    let (board, to_place, score, _) = expect_move(
        solve_with(&WeightedFeatures, EMPTY, (9, 9), Algorithm::AlphaBeta, 1).unwrap(),
    );
    assert_eq!(to_place, (8, 9));
    let pos = Position::parse(&board, (8, 9)).unwrap();
    assert!(score > 0);
    assert!(score <= 1000);
    assert_eq!(pos.piece_count(Player::X), 1);
}

// =============================================================================
// Notation and games
// =============================================================================

#[test]
fn test_play_sequence_by_notation() {
    let pos = play_sequence(&["a1", "g7", "d1", "a7", "g1xg7"]);
    assert_eq!(pos.markers(), "xxx,,,,,,,,,,,,,,,,,,0,,");
    assert_eq!(pos.to_place_pair(), (6, 7));
    assert_eq!(pos.get(parse_coord("a7").unwrap()), Some(Player::O));
    assert_eq!(pos.get(parse_coord("g7").unwrap()), None);
}

#[test]
fn test_coordinates_roundtrip() {
    for pt in 0..24 {
        assert_eq!(parse_coord(&str_coord(pt)), Some(pt));
    }
}

#[test]
fn test_self_play_from_empty_board() {
    let game = self_play(1, Algorithm::AlphaBeta, 11, 40);
    assert!(game.moves.len() <= 40);
    if game.winner.is_none() {
        assert_eq!(game.moves.len(), 40);
    }

    // Replaying the recorded moves reaches the recorded position.
    let notations: Vec<String> = game.moves.iter().map(|m| m.to_string()).collect();
    let refs: Vec<&str> = notations.iter().map(String::as_str).collect();
    assert_eq!(play_sequence(&refs), game.position);
}

#[test]
fn test_engine_finishes_a_won_position() {
    // O is down to three pieces; X can close a mill and capture one.
    let pos = Position::parse("x,x0x0,,,,x,,,,,,,,,,,,0", (0, 0)).unwrap();
    let game = play_from(pos, 2, Algorithm::AlphaBeta, 5, 20);
    assert_eq!(game.moves.len(), 1);
    assert!(game.moves[0].is_capture());
    assert_eq!(game.moves[0].to_string(), "d2-d1xb2");
    assert_eq!(game.winner, Some(Player::X));
}
