use pathvis_core::{Pos, State};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::predecessors::PredecessorMap;
use crate::searcher::{Searcher, UNREACHED, index};

impl Searcher<'_> {
    /// Uniform-cost search from `start` to `end`.
    ///
    /// Reached neighbours are marked Open and expanded cells Closed, except
    /// the start, the target and `ignore`. The returned map lacks `end` when
    /// no path exists and is empty when either endpoint is off-grid.
    pub fn dijkstra(
        &mut self,
        start: Pos,
        end: Pos,
        ignore: Option<Pos>,
        draw: bool,
    ) -> PredecessorMap {
        self.single_source(start, end, ignore, draw, false)
    }

    /// Shared expansion loop for Dijkstra and A*. With `heuristic` set the
    /// frontier priority is `distance + manhattan(cell, end)`.
    pub(crate) fn single_source(
        &mut self,
        start: Pos,
        end: Pos,
        ignore: Option<Pos>,
        draw: bool,
        heuristic: bool,
    ) -> PredecessorMap {
        self.timer.reset();
        if !self.endpoints_valid(start, end) {
            return PredecessorMap::empty();
        }
        let h = |p: Pos| if heuristic { manhattan(p, end) } else { 0 };

        let dimension = self.dimension();
        let mut dist = vec![UNREACHED; (dimension * dimension) as usize];
        let mut came_from = PredecessorMap::new(start);
        let mut open = Frontier::new();
        dist[index(dimension, start)] = 0;
        open.push(start, h(start));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;
        self.timer.stop(false);

        while let Some((cur, priority)) = open.pop_with_priority() {
            let g = dist[index(dimension, cur)];
            if priority > g + h(cur) {
                // Superseded by a cheaper entry.
                continue;
            }
            self.timer.start();
            if cur == end {
                found = true;
                break;
            }

            nbuf.clear();
            self.grid.lock().neighbors_into(cur, false, &mut nbuf);
            for &n in nbuf.iter() {
                let ni = index(dimension, n);
                let tentative = g + 1;
                if tentative >= dist[ni] {
                    continue;
                }
                dist[ni] = tentative;
                came_from.insert(n, cur);
                open.push(n, tentative + h(n));

                if n != end && Some(n) != ignore {
                    let mut grid = self.grid.lock();
                    if !grid.is(n, State::Closed) {
                        grid.set_open(n);
                    }
                }
            }

            if cur != start && Some(cur) != ignore {
                self.grid.lock().set_closed(cur);
            }
            self.timer.stop(true);
        }
        self.nbuf = nbuf;

        if found {
            log::debug!("reached {end} after {} expansions", self.timer.stats().count);
            if draw {
                self.draw_path(&came_from, end, false);
            }
        } else {
            log::debug!("{end} unreachable from {start}");
        }
        came_from
    }
}
