//! A single grid cell.

use crate::geom::{Dir, Pos};
use crate::state::State;

/// A grid cell: an immutable position plus its mutable state.
///
/// Cells are owned by [`Grid`](crate::Grid) and only change through the
/// grid's transition methods, which keep the per-state sets in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    pub(crate) state: State,
    /// A Wall that an ordinal state was placed on top of.
    pub(crate) wall_under: bool,
    pub(crate) highway: bool,
    /// State replaced by [`State::History`], restored on rollback.
    pub(crate) history: Option<State>,
    /// Neighbour positions indexed by [`Dir::index`]; `None` at the border.
    neighbors: [Option<Pos>; 4],
}

impl Cell {
    /// Create an empty cell at `pos` inside a `dimension`-sized grid.
    pub(crate) fn new(pos: Pos, dimension: i32) -> Self {
        let mut neighbors = [None; 4];
        for dir in Dir::ORDER {
            let n = pos.step(dir);
            if n.row >= 0 && n.col >= 0 && n.row < dimension && n.col < dimension {
                neighbors[dir.index()] = Some(n);
            }
        }
        Self {
            pos,
            state: State::Empty,
            wall_under: false,
            highway: false,
            history: None,
            neighbors,
        }
    }

    /// The null sentinel cell. It has no neighbours.
    pub(crate) fn null() -> Self {
        Self {
            pos: Pos::NULL,
            state: State::Empty,
            wall_under: false,
            highway: false,
            history: None,
            neighbors: [None; 4],
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is(&self, state: State) -> bool {
        self.state == state
    }

    /// Whether an ordinal state currently covers a wall.
    #[inline]
    pub fn has_wall_under(&self) -> bool {
        self.wall_under
    }

    #[inline]
    pub fn is_highway(&self) -> bool {
        self.highway
    }

    /// The state saved by `set_history`, if any.
    #[inline]
    pub fn history(&self) -> Option<State> {
        self.history
    }

    /// Neighbour in a given direction, if it exists.
    #[inline]
    pub fn neighbor(&self, dir: Dir) -> Option<Pos> {
        self.neighbors[dir.index()]
    }

    /// Existing neighbours in Left, Up, Right, Down order.
    pub fn neighbors(&self) -> impl Iterator<Item = Pos> + '_ {
        self.neighbors.iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        let c = Cell::new(Pos::new(0, 0), 5);
        let n: Vec<_> = c.neighbors().collect();
        assert_eq!(n, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        assert_eq!(c.neighbor(Dir::Left), None);
        assert_eq!(c.neighbor(Dir::Up), None);
    }

    #[test]
    fn interior_order_is_left_up_right_down() {
        let c = Cell::new(Pos::new(2, 2), 5);
        let n: Vec<_> = c.neighbors().collect();
        assert_eq!(
            n,
            vec![Pos::new(2, 1), Pos::new(1, 2), Pos::new(2, 3), Pos::new(3, 2)]
        );
    }

    #[test]
    fn null_cell_is_isolated() {
        let c = Cell::null();
        assert!(c.pos().is_null());
        assert_eq!(c.neighbors().count(), 0);
        assert!(c.is(State::Empty));
    }
}
