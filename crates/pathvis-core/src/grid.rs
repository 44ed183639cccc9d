//! The N×N cell grid and its per-state bookkeeping.
//!
//! [`Grid`] owns every [`Cell`] in row-major order together with one
//! membership set per [`State`], so a host can enumerate all walls, all
//! path cells, etc. without scanning. Every state change also lands in a
//! pending-update set that a renderer drains at its own pace.

use std::collections::HashSet;

use crate::cell::Cell;
use crate::geom::Pos;
use crate::state::State;

/// A square grid of [`Cell`]s with state-category sets.
#[derive(Debug, Clone)]
pub struct Grid {
    dimension: i32,
    pixel_offset: i32,
    cells: Vec<Cell>,
    null: Cell,
    /// One membership set per state, indexed by [`State::index`].
    members: [HashSet<Pos>; State::COUNT],
    /// Cells changed since the last [`drain_updates`](Self::drain_updates).
    pending: HashSet<Pos>,
    track_history: bool,
    /// Cells changed while history tracking was on.
    tracked: HashSet<Pos>,
}

impl Grid {
    /// Create a `dimension`×`dimension` grid of empty cells.
    pub fn new(dimension: i32) -> Self {
        let mut g = Self {
            dimension: 0,
            pixel_offset: 0,
            cells: Vec::new(),
            null: Cell::null(),
            members: std::array::from_fn(|_| HashSet::new()),
            pending: HashSet::new(),
            track_history: false,
            tracked: HashSet::new(),
        };
        g.init(dimension, 0);
        g
    }

    /// (Re)build the grid with a new dimension.
    ///
    /// Clears every category set and the pending-update set, reallocates
    /// all cells as Empty, recomputes neighbours and recreates the null
    /// sentinel. Must not be called while a search or maze run is using
    /// the grid.
    pub fn init(&mut self, dimension: i32, pixel_offset: i32) {
        let dimension = if dimension < 0 {
            log::warn!("grid dimension {dimension} is negative, using 0");
            0
        } else {
            dimension
        };
        for set in self.members.iter_mut() {
            set.clear();
        }
        self.pending.clear();
        self.tracked.clear();
        self.dimension = dimension;
        self.pixel_offset = pixel_offset;

        let len = (dimension * dimension) as usize;
        self.cells.clear();
        self.cells.reserve(len);
        let empty = &mut self.members[State::Empty.index()];
        for row in 0..dimension {
            for col in 0..dimension {
                let p = Pos::new(row, col);
                self.cells.push(Cell::new(p, dimension));
                empty.insert(p);
            }
        }
        self.null = Cell::null();
        log::debug!("grid initialised: {dimension}x{dimension}");
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    /// Pixel offset stored for the host renderer.
    #[inline]
    pub fn pixel_offset(&self) -> i32 {
        self.pixel_offset
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` addresses a real cell. The null sentinel never does.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.dimension && pos.col < self.dimension
    }

    #[inline]
    fn idx(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row * self.dimension + pos.col) as usize)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.idx(pos).map(|i| &self.cells[i])
    }

    /// The "no selection" sentinel cell.
    pub fn null_cell(&self) -> &Cell {
        &self.null
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Current state of `pos`, or `None` outside the grid.
    pub fn state(&self, pos: Pos) -> Option<State> {
        self.cell(pos).map(Cell::state)
    }

    /// Whether `pos` is inside the grid and currently in `state`.
    #[inline]
    pub fn is(&self, pos: Pos, state: State) -> bool {
        self.state(pos) == Some(state)
    }

    #[inline]
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.is(pos, State::Wall)
    }

    pub fn is_highway(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_highway)
    }

    /// Every cell currently in `state`.
    pub fn members(&self, state: State) -> &HashSet<Pos> {
        &self.members[state.index()]
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: State) -> usize {
        self.members[state.index()].len()
    }

    /// Append the neighbours of `pos` into `buf` in Left, Up, Right, Down
    /// order. Walls are skipped unless `include_walls` is set. The caller
    /// clears `buf`.
    pub fn neighbors_into(&self, pos: Pos, include_walls: bool, buf: &mut Vec<Pos>) {
        let Some(cell) = self.cell(pos) else {
            return;
        };
        for n in cell.neighbors() {
            if include_walls || !self.is_wall(n) {
                buf.push(n);
            }
        }
    }

    /// Neighbours of `pos`; see [`neighbors_into`](Self::neighbors_into).
    pub fn neighbors(&self, pos: Pos, include_walls: bool) -> Vec<Pos> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(pos, include_walls, &mut buf);
        buf
    }

    // -----------------------------------------------------------------------
    // Pending updates
    // -----------------------------------------------------------------------

    /// Take every cell changed since the last drain, in row-major order.
    pub fn drain_updates(&mut self) -> Vec<Pos> {
        let mut out: Vec<Pos> = self.pending.drain().collect();
        out.sort_unstable();
        out
    }

    /// Number of cells waiting to be drained.
    pub fn pending_updates(&self) -> usize {
        self.pending.len()
    }

    // -----------------------------------------------------------------------
    // State transitions
    // -----------------------------------------------------------------------

    /// Move `pos` into `to`, keeping the category sets consistent.
    ///
    /// Returns `false` without touching anything when `pos` is off-grid or
    /// already in `to`.
    fn transition(&mut self, pos: Pos, to: State) -> bool {
        let Some(i) = self.idx(pos) else {
            return false;
        };
        let cell = &mut self.cells[i];
        let from = cell.state;
        if from == to {
            return false;
        }

        if to.is_ordinal() {
            cell.wall_under |= from == State::Wall;
        } else {
            cell.wall_under = false;
        }
        if to == State::Empty {
            cell.highway = false;
        }
        if to != State::History {
            cell.history = None;
        }
        cell.state = to;

        self.members[from.index()].remove(&pos);
        self.members[to.index()].insert(pos);
        self.pending.insert(pos);
        if self.track_history && from != State::History && to != State::History {
            self.tracked.insert(pos);
        }
        true
    }

    /// Set `pos` to Empty. Also clears its highway flag.
    pub fn reset(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Empty)
    }

    pub fn set_open(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Open)
    }

    pub fn set_open2(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Open2)
    }

    pub fn set_open3(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Open3)
    }

    pub fn set_closed(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Closed)
    }

    pub fn set_closed2(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Closed2)
    }

    pub fn set_closed3(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Closed3)
    }

    /// Mark `pos` as the start. A wall underneath is remembered.
    pub fn set_start(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Start)
    }

    /// Mark `pos` as the intermediate waypoint. A wall underneath is remembered.
    pub fn set_mid(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Mid)
    }

    /// Mark `pos` as the end. A wall underneath is remembered.
    pub fn set_end(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::End)
    }

    pub fn set_wall(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Wall)
    }

    pub fn set_path(&mut self, pos: Pos) -> bool {
        self.transition(pos, State::Path)
    }

    /// Take an ordinal marker off `pos`, restoring the wall it covered or
    /// leaving the cell Empty.
    pub fn release_ordinal(&mut self, pos: Pos) -> bool {
        let Some(cell) = self.cell(pos) else {
            return false;
        };
        if !cell.state().is_ordinal() {
            return false;
        }
        if cell.has_wall_under() {
            self.set_wall(pos)
        } else {
            self.reset(pos)
        }
    }

    /// Flag `pos` as part of a highway. Classification only.
    pub fn set_highway(&mut self, pos: Pos, highway: bool) -> bool {
        let Some(i) = self.idx(pos) else {
            return false;
        };
        if self.cells[i].highway == highway {
            return false;
        }
        self.cells[i].highway = highway;
        self.pending.insert(pos);
        true
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Start or stop recording which cells change.
    pub fn set_track_history(&mut self, track: bool) {
        self.track_history = track;
    }

    pub fn track_history(&self) -> bool {
        self.track_history
    }

    /// Cells recorded while tracking was on.
    pub fn tracked_history(&self) -> &HashSet<Pos> {
        &self.tracked
    }

    /// Temporarily show `pos` as History, remembering its current state.
    ///
    /// Path and ordinal cells are left alone so the result stays readable.
    pub fn set_history(&mut self, pos: Pos) -> bool {
        let Some(prev) = self.state(pos) else {
            return false;
        };
        if prev == State::History || prev == State::Path || prev.is_ordinal() {
            return false;
        }
        if !self.transition(pos, State::History) {
            return false;
        }
        if let Some(i) = self.idx(pos) {
            self.cells[i].history = Some(prev);
        }
        true
    }

    /// Restore the state `pos` had before [`set_history`](Self::set_history).
    pub fn rollback_history(&mut self, pos: Pos) -> bool {
        let Some(i) = self.idx(pos) else {
            return false;
        };
        if self.cells[i].state != State::History {
            return false;
        }
        let prev = self.cells[i].history.take().unwrap_or_default();
        self.transition(pos, prev)
    }

    /// Turn every tracked cell into History and forget the tracked set.
    /// Returns how many cells changed.
    pub fn show_history(&mut self) -> usize {
        let tracked: Vec<Pos> = self.tracked.drain().collect();
        tracked.into_iter().filter(|&p| self.set_history(p)).count()
    }

    /// Roll back every History cell.
    pub fn rollback_all_history(&mut self) -> usize {
        let cells: Vec<Pos> = self.members(State::History).iter().copied().collect();
        cells.into_iter().filter(|&p| self.rollback_history(p)).count()
    }

    // -----------------------------------------------------------------------
    // Bulk resets
    // -----------------------------------------------------------------------

    /// Clear search output (open, closed and path cells), keeping walls and
    /// endpoints.
    pub fn reset_algorithm_marks(&mut self) -> usize {
        let mut n = 0;
        for state in State::SEARCH_MARKS {
            let cells: Vec<Pos> = self.members(state).iter().copied().collect();
            for p in cells {
                if self.reset(p) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Reset every cell to Empty, dropping walls, endpoints, highways and
    /// history.
    pub fn reset_all(&mut self) -> usize {
        let mut n = 0;
        for i in 0..self.cells.len() {
            let pos = self.cells[i].pos();
            self.cells[i].wall_under = false;
            if self.reset(pos) {
                n += 1;
            } else if self.cells[i].highway {
                self.set_highway(pos, false);
            }
        }
        self.tracked.clear();
        n
    }
}
