use std::fmt;

use crate::position::{Point, Position};
use crate::topology::topology;

/// Diagram rows. `@` marks where a point is drawn; every other character is
/// copied as is.
const DIAGRAM: [&str; 13] = [
    "@-----------@-----------@",
    "|           |           |",
    "|   @-------@-------@   |",
    "|   |       |       |   |",
    "|   |   @---@---@   |   |",
    "|   |   |       |   |   |",
    "@---@---@       @---@---@",
    "|   |   |       |   |   |",
    "|   |   @---@---@   |   |",
    "|   |       |       |   |",
    "|   @-------@-------@   |",
    "|           |           |",
    "@-----------@-----------@",
];

/// Parse a coordinate string (e.g., "d2") into a Point.
///
/// Columns are `a`..`g` from the left, rows `1`..`7` from the top. Returns
/// `None` for malformed strings and for grid cells that are not board points.
pub fn parse_coord(s: &str) -> Option<Point> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].to_ascii_lowercase().checked_sub(b'a')? as usize;
    let row = bytes[1].checked_sub(b'1')? as usize;
    if col >= 7 || row >= 7 {
        return None;
    }
    topology().point_at(row, col)
}

/// Convert a Point to a coordinate string (e.g., "d2").
pub fn str_coord(pt: Point) -> String {
    let (row, col) = topology().coords(pt);
    format!("{}{}", (b'a' + col as u8) as char, row + 1)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    a   b   c   d   e   f   g")?;
        let mut pt = 0;
        for (i, line) in DIAGRAM.iter().enumerate() {
            if i % 2 == 0 {
                write!(f, "{}   ", i / 2 + 1)?;
            } else {
                write!(f, "    ")?;
            }
            for ch in line.chars() {
                if ch == '@' {
                    let symbol = self.get(pt).map_or('.', |p| p.marker());
                    write!(f, "{symbol}")?;
                    pt += 1;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        let (x, o) = self.to_place_pair();
        writeln!(f, "to place: x={x} 0={o}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Player;
    use crate::topology::NUM_POINTS;

    #[test]
    fn test_coord_roundtrip() {
        for pt in 0..NUM_POINTS {
            let s = str_coord(pt);
            assert_eq!(parse_coord(&s), Some(pt), "roundtrip failed for {s}");
        }
    }

    #[test]
    fn test_coord_corners() {
        assert_eq!(str_coord(0), "a1");
        assert_eq!(str_coord(2), "g1");
        assert_eq!(str_coord(21), "a7");
        assert_eq!(str_coord(23), "g7");
        assert_eq!(parse_coord("D2"), Some(4));
    }

    #[test]
    fn test_parse_coord_rejects_non_points() {
        assert_eq!(parse_coord("d4"), None); // center of the board
        assert_eq!(parse_coord("b1"), None);
        assert_eq!(parse_coord("h1"), None);
        assert_eq!(parse_coord("a8"), None);
        assert_eq!(parse_coord("a"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn test_diagram_has_every_point() {
        let placeholders: usize = DIAGRAM.iter().map(|l| l.matches('@').count()).sum();
        assert_eq!(placeholders, NUM_POINTS);
    }

    #[test]
    fn test_display_shows_pieces() {
        let mut cells = [None; NUM_POINTS];
        cells[0] = Some(Player::X);
        cells[23] = Some(Player::O);
        let pos = Position::from_parts(cells, (8, 8));
        let text = pos.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("1   x"));
        assert!(lines[13].ends_with('0'));
        assert!(text.contains("to place: x=8 0=8"));
    }
}
