use std::thread;

use pathvis_core::{Pos, State};

use crate::bidirectional::BiSearch;
use crate::predecessors::PredecessorMap;
use crate::searcher::Searcher;

/// Cells strictly between the source and `terminal`, in drawing order.
fn path_cells(map: &PredecessorMap, terminal: Pos, reverse: bool) -> Vec<Pos> {
    let mut cells = map.trace(terminal);
    // Drop the source.
    cells.pop();
    if !reverse {
        cells.reverse();
    }
    cells
}

impl Searcher<'_> {
    /// Mark the cells between the map's source and `terminal` as Path,
    /// pausing the path delay before each one.
    ///
    /// The source, `terminal` and any Start/Mid/End cell on the way are
    /// left alone. Forward legs are drawn from the source side, reverse
    /// legs from the terminal side. Returns the number of cells that
    /// changed.
    pub fn draw_path(&mut self, map: &PredecessorMap, terminal: Pos, reverse: bool) -> usize {
        if let Some(f) = self.on_path.as_mut() {
            f();
        }
        let mut changed = 0;
        for p in path_cells(map, terminal, reverse) {
            if !self.path_delay.is_zero() {
                thread::sleep(self.path_delay);
            }
            let mut grid = self.grid.lock();
            if grid.state(p).is_some_and(State::is_ordinal) {
                continue;
            }
            if grid.set_path(p) {
                changed += 1;
            }
        }
        changed
    }

    /// Draw a bidirectional result: the forward half toward the meeting,
    /// the two meeting cells, then the backward half toward the end.
    pub fn draw_bidirectional(&mut self, bi: &BiSearch) -> usize {
        let Some(m) = bi.meeting else {
            return 0;
        };
        let mut changed = self.draw_path(&bi.forward, m.forward, false);
        {
            let endpoints = [bi.forward.source(), bi.backward.source()];
            let mut grid = self.grid.lock();
            for p in [m.forward, m.backward] {
                if endpoints.contains(&Some(p)) || grid.state(p).is_some_and(State::is_ordinal) {
                    continue;
                }
                if grid.set_path(p) {
                    changed += 1;
                }
            }
        }
        changed += self.draw_path(&bi.backward, m.backward, true);
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pathvis_core::{Grid, SharedGrid};

    use super::*;

    #[test]
    fn forward_and_reverse_order() {
        let mut map = PredecessorMap::new(Pos::new(0, 0));
        for col in 1..4 {
            map.insert(Pos::new(0, col), Pos::new(0, col - 1));
        }
        let terminal = Pos::new(0, 3);
        assert_eq!(
            path_cells(&map, terminal, false),
            vec![Pos::new(0, 1), Pos::new(0, 2)]
        );
        assert_eq!(
            path_cells(&map, terminal, true),
            vec![Pos::new(0, 2), Pos::new(0, 1)]
        );

        let shared = SharedGrid::new(Grid::new(4));
        let mut s = Searcher::new(shared.clone()).with_path_delay(Duration::ZERO);
        assert_eq!(s.draw_path(&map, terminal, true), 2);
        assert_eq!(
            shared.with(Grid::drain_updates),
            vec![Pos::new(0, 1), Pos::new(0, 2)]
        );
    }

    #[test]
    fn already_marked_cells_are_skipped() {
        let shared = SharedGrid::new(Grid::new(3));
        let mut map = PredecessorMap::new(Pos::new(0, 0));
        map.insert(Pos::new(0, 1), Pos::new(0, 0));
        map.insert(Pos::new(0, 2), Pos::new(0, 1));
        shared.lock().set_path(Pos::new(0, 1));
        let mut s = Searcher::new(shared.clone()).with_path_delay(Duration::ZERO);
        assert_eq!(s.draw_path(&map, Pos::new(0, 2), false), 0);
        assert!(shared.lock().is(Pos::new(0, 1), State::Path));
        assert!(!shared.lock().is(Pos::new(0, 0), State::Path));
    }

    #[test]
    fn ordinal_cells_on_the_way_survive() {
        let shared = SharedGrid::new(Grid::new(3));
        let mut map = PredecessorMap::new(Pos::new(0, 0));
        map.insert(Pos::new(0, 1), Pos::new(0, 0));
        map.insert(Pos::new(0, 2), Pos::new(0, 1));
        shared.lock().set_end(Pos::new(0, 1));
        let mut s = Searcher::new(shared.clone()).with_path_delay(Duration::ZERO);
        assert_eq!(s.draw_path(&map, Pos::new(0, 2), false), 0);
        assert!(shared.lock().is(Pos::new(0, 1), State::End));
    }

    #[test]
    fn unreached_terminal_draws_nothing() {
        let shared = SharedGrid::new(Grid::new(3));
        let map = PredecessorMap::new(Pos::new(0, 0));
        let mut s = Searcher::new(shared.clone()).with_path_delay(Duration::ZERO);
        assert_eq!(s.draw_path(&map, Pos::new(2, 2), false), 0);
        assert_eq!(shared.lock().count(State::Path), 0);
    }

    #[test]
    fn path_delay_is_applied() {
        let shared = SharedGrid::new(Grid::new(3));
        let mut map = PredecessorMap::new(Pos::new(0, 0));
        map.insert(Pos::new(0, 1), Pos::new(0, 0));
        map.insert(Pos::new(0, 2), Pos::new(0, 1));
        let mut s = Searcher::new(shared).with_path_delay(Duration::from_millis(5));
        let t = std::time::Instant::now();
        s.draw_path(&map, Pos::new(0, 2), false);
        assert!(t.elapsed() >= Duration::from_millis(5));
    }
}
