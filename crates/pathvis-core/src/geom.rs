//! Grid coordinates: [`Pos`] and the cardinal [`Dir`]ections.
//!
//! Cells are addressed by `(row, col)`. Rows grow downward and columns grow
//! to the right, matching the row-major layout of [`Grid`](crate::Grid).

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell identity on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// The null sentinel: "no cell selected". Never contained in a grid.
    pub const NULL: Self = Self { row: -1, col: -1 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether this is the null sentinel.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.row == Self::NULL.row && self.col == Self::NULL.col
    }

    /// The neighbouring position in direction `dir` (may be off-grid).
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        let (dr, dc) = dir.delta();
        self.shift(dr, dc)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the four cardinal directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Left,
    Up,
    Right,
    Down,
}

impl Dir {
    /// Neighbour iteration order. Searches break ties on insertion order, so
    /// this order is part of their observable behaviour.
    pub const ORDER: [Dir; 4] = [Dir::Left, Dir::Up, Dir::Right, Dir::Down];

    /// Row/column offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir::Left => (0, -1),
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
        }
    }

    /// Index of this direction within [`Dir::ORDER`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Dir::Left => 0,
            Dir::Up => 1,
            Dir::Right => 2,
            Dir::Down => 3,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_round_trip() {
        let p = Pos::new(4, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
