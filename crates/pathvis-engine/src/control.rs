//! The engine's control block: what to run, with which endpoints, and how
//! the last run went.

use std::fmt;
use std::time::Duration;

use pathvis_core::Pos;
use pathvis_paths::{SearchKind, TimerStats};

/// What the worker is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    None,
    Algorithm,
    Maze,
}

/// Algorithm identifier as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    None,
    Dijkstra,
    AStar,
    BiDijkstra,
    /// Reported while a path is being drawn.
    BestPath,
    RecursiveMaze,
}

impl Algorithm {
    /// The search this id selects, if it is one.
    pub fn search_kind(self) -> Option<SearchKind> {
        match self {
            Algorithm::Dijkstra => Some(SearchKind::Dijkstra),
            Algorithm::AStar => Some(SearchKind::AStar),
            Algorithm::BiDijkstra => Some(SearchKind::BiDijkstra),
            _ => None,
        }
    }
}

impl From<SearchKind> for Algorithm {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Dijkstra => Algorithm::Dijkstra,
            SearchKind::AStar => Algorithm::AStar,
            SearchKind::BiDijkstra => Algorithm::BiDijkstra,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::None => "none",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a*",
            Algorithm::BiDijkstra => "bidirectional dijkstra",
            Algorithm::BestPath => "best path",
            Algorithm::RecursiveMaze => "recursive maze",
        })
    }
}

/// Map the null sentinel to "unset".
#[inline]
pub(crate) fn endpoint(p: Option<Pos>) -> Option<Pos> {
    p.filter(|p| !p.is_null())
}

/// Shared state between the host and the worker, guarded by one mutex.
#[derive(Debug, Clone)]
pub(crate) struct Control {
    pub(crate) phase: Phase,
    pub(crate) algorithm: Algorithm,
    pub(crate) finished: bool,
    pub(crate) start: Option<Pos>,
    pub(crate) mid: Option<Pos>,
    pub(crate) end: Option<Pos>,
    pub(crate) ignore: Option<Pos>,
    pub(crate) path_delay: Duration,
    pub(crate) maze_delay: Duration,
    pub(crate) timer: TimerStats,
    pub(crate) last_algorithm: Option<Algorithm>,
    /// Bumped by every `run` and `reset`; a job only publishes its result
    /// while it is still the latest request.
    pub(crate) request: u64,
    /// Request currently being executed, if any.
    pub(crate) running: Option<u64>,
    pub(crate) shutdown: bool,
}

impl Control {
    pub(crate) fn new(path_delay: Duration, maze_delay: Duration) -> Self {
        Self {
            phase: Phase::None,
            algorithm: Algorithm::None,
            finished: false,
            start: None,
            mid: None,
            end: None,
            ignore: None,
            path_delay,
            maze_delay,
            timer: TimerStats::default(),
            last_algorithm: None,
            request: 0,
            running: None,
            shutdown: false,
        }
    }

    /// Whether a request is waiting for the worker.
    pub(crate) fn has_work(&self) -> bool {
        self.phase != Phase::None && !self.finished && self.running != Some(self.request)
    }

    /// Freeze the current request into a job and mark it running.
    pub(crate) fn take_job(&mut self) -> Job {
        self.running = Some(self.request);
        Job {
            request: self.request,
            phase: self.phase,
            algorithm: self.algorithm,
            start: self.start,
            mid: self.mid,
            end: self.end,
            ignore: self.ignore,
            path_delay: self.path_delay,
            maze_delay: self.maze_delay,
        }
    }
}

/// A snapshot of one request, executed without holding the lock.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Job {
    pub(crate) request: u64,
    pub(crate) phase: Phase,
    pub(crate) algorithm: Algorithm,
    pub(crate) start: Option<Pos>,
    pub(crate) mid: Option<Pos>,
    pub(crate) end: Option<Pos>,
    pub(crate) ignore: Option<Pos>,
    pub(crate) path_delay: Duration,
    pub(crate) maze_delay: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_kinds_map_both_ways() {
        for kind in [SearchKind::Dijkstra, SearchKind::AStar, SearchKind::BiDijkstra] {
            assert_eq!(Algorithm::from(kind).search_kind(), Some(kind));
        }
        assert_eq!(Algorithm::BestPath.search_kind(), None);
        assert_eq!(Algorithm::RecursiveMaze.search_kind(), None);
    }

    #[test]
    fn null_sentinel_means_unset() {
        assert_eq!(endpoint(Some(Pos::NULL)), None);
        assert_eq!(endpoint(None), None);
        assert_eq!(endpoint(Some(Pos::new(0, 0))), Some(Pos::new(0, 0)));
    }

    #[test]
    fn work_is_taken_once() {
        let mut c = Control::new(Duration::ZERO, Duration::ZERO);
        assert!(!c.has_work());
        c.phase = Phase::Algorithm;
        c.request = 1;
        assert!(c.has_work());
        let job = c.take_job();
        assert_eq!(job.request, 1);
        assert!(!c.has_work());
        // A newer request while the old one runs is work again.
        c.request = 2;
        assert!(c.has_work());
    }
}
