//! Recursive-division maze generation.
//!
//! Each chamber is cut by a vertical and a horizontal wall through its
//! middle, one-cell gaps are punched into the resulting wall segments, and
//! the four quarter chambers are divided in turn. With at least three gaps
//! per division every open cell stays reachable.

use std::thread;
use std::time::Duration;

use pathvis_core::{Grid, Pos, SharedGrid};
use pathvis_paths::{RunTimer, TimerStats};
use rand::{Rng, RngExt};

use crate::chamber::{Chamber, Segment};

/// Default pause between two wall or gap writes.
pub const DEFAULT_MAZE_DELAY: Duration = Duration::from_micros(250);

/// Smallest chamber side that is still divided.
pub const MIN_DIVISION_LIMIT: i32 = 3;

/// Recursive-division parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// A chamber side shorter than this is not divided further.
    pub division_limit: i32,
    /// Gaps punched per division.
    pub num_gaps: usize,
    /// Pause between two grid writes.
    pub delay: Duration,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            division_limit: 3,
            num_gaps: 3,
            delay: DEFAULT_MAZE_DELAY,
        }
    }
}

/// Counters for one generated maze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MazeStats {
    /// Chambers that were divided.
    pub divisions: usize,
    pub walls: usize,
    pub gaps: usize,
}

/// Maze generator writing into a [`SharedGrid`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    grid: SharedGrid,
    config: MazeConfig,
    timer: RunTimer,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(grid: SharedGrid, rng: R) -> Self {
        Self {
            rng,
            grid,
            config: MazeConfig::default(),
            timer: RunTimer::new(),
        }
    }

    /// Replace the configuration. A division limit below
    /// [`MIN_DIVISION_LIMIT`] is raised to it.
    pub fn with_config(mut self, config: MazeConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn set_config(&mut self, mut config: MazeConfig) {
        if config.division_limit < MIN_DIVISION_LIMIT {
            log::warn!(
                "division limit {} too small, using {MIN_DIVISION_LIMIT}",
                config.division_limit
            );
            config.division_limit = MIN_DIVISION_LIMIT;
        }
        self.config = config;
    }

    pub fn config(&self) -> MazeConfig {
        self.config
    }

    /// Statistics of the most recent run.
    pub fn timer(&self) -> TimerStats {
        self.timer.stats()
    }

    /// Divide the whole grid into a maze. Existing walls are kept; every
    /// other cell crossed by a dividing line becomes Wall unless it is a
    /// gap.
    pub fn recursive_division(&mut self) -> MazeStats {
        self.timer.reset();
        let dimension = self.grid.lock().dimension();
        let mut stats = MazeStats::default();
        self.timer.stop(false);
        self.divide(Chamber::whole(dimension), dimension, &mut stats);
        log::info!(
            "maze {dimension}x{dimension}: {} divisions, {} walls, {} gaps",
            stats.divisions,
            stats.walls,
            stats.gaps
        );
        stats
    }

    fn divide(&mut self, chamber: Chamber, dimension: i32, stats: &mut MazeStats) {
        let limit = self.config.division_limit;
        // A line across a one-cell side would have no segment to gap.
        let vertical = chamber.width >= limit && chamber.height >= 2;
        let horizontal = chamber.height >= limit && chamber.width >= 2;
        if !vertical && !horizontal {
            return;
        }
        stats.divisions += 1;

        if vertical {
            for p in chamber.vertical_line() {
                stats.walls += usize::from(self.write(|g| g.set_wall(p)));
            }
        }
        if horizontal {
            for p in chamber.horizontal_line() {
                stats.walls += usize::from(self.write(|g| g.set_wall(p)));
            }
        }

        let mut segments = chamber.segments(vertical, horizontal);
        let k = self.config.num_gaps.min(segments.len());
        // Partial Fisher-Yates: the first k entries become the sample.
        for i in 0..k {
            let j = self.rng.random_range(i..segments.len());
            segments.swap(i, j);
        }
        for seg in &segments[..k] {
            let p = self.gap_position(seg, dimension);
            stats.gaps += usize::from(self.write(|g| g.reset(p)));
        }

        for quarter in chamber.quadrants() {
            self.divide(quarter, dimension, stats);
        }
    }

    /// Pick a gap cell on `seg`, stepping off any landmark and clamping to
    /// the grid.
    fn gap_position(&mut self, seg: &Segment, dimension: i32) -> Pos {
        let mut offset = self.rng.random_range(seg.start..seg.start + seg.len);
        if seg.landmarks(self.config.division_limit).contains(&offset) {
            offset = if seg.contains_offset(offset + 1) {
                offset + 1
            } else {
                offset - 1
            };
        }
        let offset = offset.clamp(0, (dimension - 1).max(0));
        seg.cell(offset)
    }

    /// Apply one timed, delayed grid write.
    fn write(&mut self, f: impl FnOnce(&mut Grid) -> bool) -> bool {
        self.timer.start();
        let changed = self.grid.with(f);
        if !self.config.delay.is_zero() {
            thread::sleep(self.config.delay);
        }
        self.timer.stop(true);
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use pathvis_core::State;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn generate(dimension: i32, seed: u64) -> (Grid, MazeStats) {
        let shared = SharedGrid::new(Grid::new(dimension));
        let config = MazeConfig {
            delay: Duration::ZERO,
            ..MazeConfig::default()
        };
        let mut mg = MazeGen::new(shared.clone(), StdRng::seed_from_u64(seed)).with_config(config);
        let stats = mg.recursive_division();
        let grid = shared.lock().clone();
        (grid, stats)
    }

    /// Number of open cells reachable from the first open cell.
    fn flood(grid: &Grid) -> usize {
        let Some(first) = grid.cells().iter().find(|c| !c.is(State::Wall)) else {
            return 0;
        };
        let mut seen = HashSet::from([first.pos()]);
        let mut queue = VecDeque::from([first.pos()]);
        while let Some(p) = queue.pop_front() {
            for n in grid.neighbors(p, false) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn every_open_cell_is_reachable() {
        for dimension in [5, 8, 13, 20, 31, 40] {
            for seed in 0..8 {
                let (grid, stats) = generate(dimension, seed);
                let open = grid.len() - grid.count(State::Wall);
                assert!(stats.walls > 0);
                assert_eq!(flood(&grid), open, "dimension {dimension}, seed {seed}");
            }
        }
    }

    #[test]
    fn small_grids_are_left_alone() {
        for dimension in [0, 1, 2] {
            let (grid, stats) = generate(dimension, 1);
            assert_eq!(stats, MazeStats::default());
            assert_eq!(grid.count(State::Wall), 0);
        }
    }

    #[test]
    fn first_division_splits_the_middle() {
        let (grid, stats) = generate(3, 7);
        // One division: a plus through the centre with three of its four
        // arms opened.
        assert_eq!(stats.divisions, 1);
        assert_eq!(stats.gaps, 3);
        assert!(grid.is_wall(Pos::new(1, 1)));
        assert_eq!(grid.count(State::Wall), 2);
    }

    #[test]
    fn same_seed_same_maze() {
        let (a, _) = generate(16, 99);
        let (b, _) = generate(16, 99);
        assert_eq!(a.members(State::Wall), b.members(State::Wall));
    }

    #[test]
    fn small_limit_is_raised() {
        let shared = SharedGrid::new(Grid::new(4));
        let mg = MazeGen::new(shared, StdRng::seed_from_u64(0)).with_config(MazeConfig {
            division_limit: 1,
            ..MazeConfig::default()
        });
        assert_eq!(mg.config().division_limit, MIN_DIVISION_LIMIT);
    }

    #[test]
    fn timer_counts_writes() {
        let shared = SharedGrid::new(Grid::new(9));
        let mut mg = MazeGen::new(shared, StdRng::seed_from_u64(3)).with_config(MazeConfig {
            delay: Duration::ZERO,
            ..MazeConfig::default()
        });
        let stats = mg.recursive_division();
        assert!(mg.timer().count as usize >= stats.walls + stats.gaps);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: MazeConfig = serde_json::from_str(r#"{"num_gaps": 4}"#).unwrap();
        assert_eq!(cfg.num_gaps, 4);
        assert_eq!(cfg.division_limit, 3);
        assert_eq!(cfg.delay, DEFAULT_MAZE_DELAY);
    }
}
