use std::fmt;
use std::time::Duration;

use pathvis_core::{Pos, SharedGrid};

use crate::bidirectional::BiSearch;
use crate::predecessors::PredecessorMap;
use crate::timer::{RunTimer, TimerStats};

/// Default pause between two Path marks.
pub const DEFAULT_PATH_DELAY: Duration = Duration::from_millis(3);

/// Distance value of a cell not reached yet.
pub(crate) const UNREACHED: i32 = i32::MAX;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchKind {
    Dijkstra,
    AStar,
    BiDijkstra,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchKind::Dijkstra => "dijkstra",
            SearchKind::AStar => "a*",
            SearchKind::BiDijkstra => "bidirectional dijkstra",
        })
    }
}

/// Result of one search leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dijkstra or A* from the map's source toward `target`.
    Single { map: PredecessorMap, target: Pos },
    Bidirectional(BiSearch),
}

impl Outcome {
    /// Whether the leg connected its endpoints.
    pub fn reached(&self) -> bool {
        match self {
            Outcome::Single { map, target } => map.reaches(*target),
            Outcome::Bidirectional(bi) => bi.meeting.is_some(),
        }
    }

    /// Every cell of the leg, source and target included.
    pub fn path(&self) -> Option<Vec<Pos>> {
        match self {
            Outcome::Single { map, target } => map.path_to(*target),
            Outcome::Bidirectional(bi) => bi.path(),
        }
    }

    /// Number of steps in the leg.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
}

/// Runs searches against a [`SharedGrid`], marking cells as it goes.
///
/// The grid is locked once per cell mutation or neighbour read, never for
/// a whole run, so another thread can watch progress. Search methods are
/// spread over the `dijkstra`, `astar`, `bidirectional`, `best_path` and
/// `legs` modules.
pub struct Searcher<'a> {
    pub(crate) grid: SharedGrid,
    pub(crate) timer: RunTimer,
    pub(crate) path_delay: Duration,
    /// Called when path drawing begins.
    pub(crate) on_path: Option<Box<dyn FnMut() + 'a>>,
    /// Reusable neighbour buffer.
    pub(crate) nbuf: Vec<Pos>,
}

impl<'a> Searcher<'a> {
    pub fn new(grid: SharedGrid) -> Self {
        Self {
            grid,
            timer: RunTimer::new(),
            path_delay: DEFAULT_PATH_DELAY,
            on_path: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn with_path_delay(mut self, delay: Duration) -> Self {
        self.path_delay = delay;
        self
    }

    /// Register a callback fired each time path drawing starts.
    pub fn on_path_drawing(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_path = Some(Box::new(f));
        self
    }

    pub fn set_path_delay(&mut self, delay: Duration) {
        self.path_delay = delay;
    }

    pub fn path_delay(&self) -> Duration {
        self.path_delay
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    /// Statistics of the most recent search.
    pub fn timer(&self) -> TimerStats {
        self.timer.stats()
    }

    /// Run `kind` from `start` to `end`. `ignore` is a cell never marked
    /// Open or Closed. With `draw` set the path is marked on success.
    pub fn run(
        &mut self,
        kind: SearchKind,
        start: Pos,
        end: Pos,
        ignore: Option<Pos>,
        draw: bool,
    ) -> Outcome {
        log::debug!("{kind}: {start} -> {end}");
        match kind {
            SearchKind::Dijkstra => Outcome::Single {
                map: self.dijkstra(start, end, ignore, draw),
                target: end,
            },
            SearchKind::AStar => Outcome::Single {
                map: self.astar(start, end, ignore, draw),
                target: end,
            },
            SearchKind::BiDijkstra => {
                Outcome::Bidirectional(self.bi_dijkstra(start, end, ignore, draw))
            }
        }
    }

    /// Mark the path of a finished leg. Returns how many cells changed.
    pub fn draw(&mut self, outcome: &Outcome) -> usize {
        match outcome {
            Outcome::Single { map, target } => self.draw_path(map, *target, false),
            Outcome::Bidirectional(bi) => self.draw_bidirectional(bi),
        }
    }

    /// Both endpoints are real cells; logs and returns `false` otherwise.
    pub(crate) fn endpoints_valid(&self, start: Pos, end: Pos) -> bool {
        let g = self.grid.lock();
        if g.contains(start) && g.contains(end) {
            return true;
        }
        log::debug!("search skipped: endpoint outside grid ({start} -> {end})");
        false
    }

    pub(crate) fn dimension(&self) -> i32 {
        self.grid.lock().dimension()
    }
}

/// Dense index of an in-grid cell.
#[inline]
pub(crate) fn index(dimension: i32, p: Pos) -> usize {
    (p.row * dimension + p.col) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathvis_core::Grid;

    #[test]
    fn outcome_reports_reachability() {
        let shared = SharedGrid::new(Grid::new(3));
        let mut s = Searcher::new(shared).with_path_delay(Duration::ZERO);
        for kind in [SearchKind::Dijkstra, SearchKind::AStar, SearchKind::BiDijkstra] {
            let out = s.run(kind, Pos::new(0, 0), Pos::new(2, 2), None, false);
            assert!(out.reached(), "{kind}");
            assert_eq!(out.path_len(), Some(4), "{kind}");
        }
    }

    #[test]
    fn draw_fires_callback() {
        let shared = SharedGrid::new(Grid::new(3));
        let mut fired = 0;
        {
            let mut s = Searcher::new(shared.clone())
                .with_path_delay(Duration::ZERO)
                .on_path_drawing(|| fired += 1);
            let out = s.run(SearchKind::Dijkstra, Pos::new(0, 0), Pos::new(0, 2), None, false);
            assert_eq!(s.draw(&out), 1);
        }
        assert_eq!(fired, 1);
        assert!(shared.lock().is(Pos::new(0, 1), pathvis_core::State::Path));
    }
}
