//! Static board geometry: points, mills, and adjacency.
//!
//! The board has 24 points on three concentric squares joined at their
//! midpoints. Points are numbered row by row from the top-left corner of the
//! outer square:
//!
//! ```text
//!  0-----------1-----------2
//!  |           |           |
//!  |   3-------4-------5   |
//!  |   |       |       |   |
//!  |   |   6---7---8   |   |
//!  |   |   |       |   |   |
//!  9--10--11      12--13--14
//!  |   |   |       |   |   |
//!  |   |  15--16--17   |   |
//!  |   |       |       |   |
//!  |  18------19------20   |
//!  |           |           |
//! 21----------22----------23
//! ```
//!
//! All tables are built once on first use and shared by every position.

use std::sync::LazyLock;

/// A point on the board, an index in `0..NUM_POINTS`.
pub type Point = usize;

/// Number of points on the board.
pub const NUM_POINTS: usize = 24;

/// Number of mill lines on the board.
pub const NUM_MILLS: usize = 16;

/// Every straight line of three points. Horizontal lines first, then vertical.
const MILLS: [[Point; 3]; NUM_MILLS] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    [0, 9, 21],
    [3, 10, 18],
    [6, 11, 15],
    [1, 4, 7],
    [16, 19, 22],
    [8, 12, 17],
    [5, 13, 20],
    [2, 14, 23],
];

/// Neighbors of each point along the board lines, in ascending order.
const ADJACENCY: [&[Point]; NUM_POINTS] = [
    &[1, 9],
    &[0, 2, 4],
    &[1, 14],
    &[4, 10],
    &[1, 3, 5, 7],
    &[4, 13],
    &[7, 11],
    &[4, 6, 8],
    &[7, 12],
    &[0, 10, 21],
    &[3, 9, 11, 18],
    &[6, 10, 15],
    &[8, 13, 17],
    &[5, 12, 14, 20],
    &[2, 13, 23],
    &[11, 16],
    &[15, 17, 19],
    &[12, 16],
    &[10, 19],
    &[16, 18, 20, 22],
    &[13, 19],
    &[9, 22],
    &[19, 21, 23],
    &[14, 22],
];

/// (row, column) of each point on a 7x7 grid.
const COORDS: [(usize, usize); NUM_POINTS] = [
    (0, 0),
    (0, 3),
    (0, 6),
    (1, 1),
    (1, 3),
    (1, 5),
    (2, 2),
    (2, 3),
    (2, 4),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 2),
    (4, 3),
    (4, 4),
    (5, 1),
    (5, 3),
    (5, 5),
    (6, 0),
    (6, 3),
    (6, 6),
];

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(Topology::build);

/// Returns the process-wide board geometry.
#[inline]
pub fn topology() -> &'static Topology {
    &TOPOLOGY
}

/// Board geometry with a per-point index of the mills running through it.
pub struct Topology {
    mills: [[Point; 3]; NUM_MILLS],
    adjacency: [&'static [Point]; NUM_POINTS],
    coords: [(usize, usize); NUM_POINTS],
    /// Indices into `mills` for every mill containing the point.
    mills_through: [Vec<usize>; NUM_POINTS],
}

impl Topology {
    fn build() -> Self {
        let mut mills_through: [Vec<usize>; NUM_POINTS] = std::array::from_fn(|_| Vec::new());
        for (i, mill) in MILLS.iter().enumerate() {
            for &pt in mill {
                mills_through[pt].push(i);
            }
        }
        Topology {
            mills: MILLS,
            adjacency: ADJACENCY,
            coords: COORDS,
            mills_through,
        }
    }

    /// All mill lines.
    #[inline]
    pub fn mills(&self) -> &[[Point; 3]] {
        &self.mills
    }

    /// The mill lines that contain `pt`.
    #[inline]
    pub fn mills_through(&self, pt: Point) -> impl Iterator<Item = &[Point; 3]> + '_ {
        self.mills_through[pt].iter().map(|&i| &self.mills[i])
    }

    /// Points reachable from `pt` in one non-flying move.
    #[inline]
    pub fn adjacent(&self, pt: Point) -> &'static [Point] {
        self.adjacency[pt]
    }

    /// Whether `a` and `b` are joined by a board line.
    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Grid coordinates (row, column) of `pt` on the 7x7 diagram.
    #[inline]
    pub fn coords(&self, pt: Point) -> (usize, usize) {
        self.coords[pt]
    }

    /// The point at grid coordinates (row, column), if any.
    pub fn point_at(&self, row: usize, col: usize) -> Option<Point> {
        self.coords.iter().position(|&c| c == (row, col))
    }
}
