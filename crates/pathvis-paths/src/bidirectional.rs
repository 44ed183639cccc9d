//! Bidirectional Dijkstra.
//!
//! Two swarms grow from the start and the end through one shared frontier.
//! Every reached cell is owned by the swarm that claimed it. The search
//! stops the first time a swarm touches a cell owned by the other one.
//! On a 4-connected unit-cost grid that first contact already lies on a
//! shortest path, because the frontier expands both swarms in order of
//! distance.

use pathvis_core::{Pos, State};

use crate::frontier::Frontier;
use crate::predecessors::PredecessorMap;
use crate::searcher::{Searcher, UNREACHED, index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swarm {
    /// Grows from the start.
    Forward,
    /// Grows from the end.
    Backward,
}

/// Where the two swarms touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meeting {
    /// Last cell of the forward swarm.
    pub forward: Pos,
    /// Last cell of the backward swarm, adjacent to `forward`.
    pub backward: Pos,
}

/// Result of a bidirectional search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiSearch {
    pub forward: PredecessorMap,
    pub backward: PredecessorMap,
    pub meeting: Option<Meeting>,
}

impl BiSearch {
    /// The full path from start to end, both included.
    pub fn path(&self) -> Option<Vec<Pos>> {
        let m = self.meeting?;
        let mut path = self.forward.path_to(m.forward)?;
        let mut back = self.backward.path_to(m.backward)?;
        back.reverse();
        if m.forward == m.backward {
            back.remove(0);
        }
        path.extend(back);
        Some(path)
    }

    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
}

impl Searcher<'_> {
    /// Bidirectional Dijkstra between `start` and `end`.
    ///
    /// Forward never marks the end Open and Backward never marks the start
    /// Open. Expanded cells are Closed unless they are an endpoint or
    /// `ignore`. With `draw` set, both halves of the path and the two
    /// meeting cells are marked.
    pub fn bi_dijkstra(
        &mut self,
        start: Pos,
        end: Pos,
        ignore: Option<Pos>,
        draw: bool,
    ) -> BiSearch {
        self.timer.reset();
        if !self.endpoints_valid(start, end) {
            return BiSearch::default();
        }
        let mut result = BiSearch {
            forward: PredecessorMap::new(start),
            backward: PredecessorMap::new(end),
            meeting: None,
        };
        if start == end {
            result.meeting = Some(Meeting {
                forward: start,
                backward: end,
            });
            return result;
        }

        let dimension = self.dimension();
        let len = (dimension * dimension) as usize;
        let mut dist = vec![UNREACHED; len];
        let mut owner: Vec<Option<Swarm>> = vec![None; len];
        let mut open = Frontier::new();
        for (p, swarm) in [(start, Swarm::Forward), (end, Swarm::Backward)] {
            dist[index(dimension, p)] = 0;
            owner[index(dimension, p)] = Some(swarm);
            open.push((p, swarm), 0);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        self.timer.stop(false);

        while let Some(((cur, swarm), priority)) = open.pop_with_priority() {
            let g = dist[index(dimension, cur)];
            if priority > g {
                continue;
            }
            self.timer.start();

            let (own_map, blocked) = match swarm {
                Swarm::Forward => (&mut result.forward, end),
                Swarm::Backward => (&mut result.backward, start),
            };

            nbuf.clear();
            self.grid.lock().neighbors_into(cur, false, &mut nbuf);
            for &n in nbuf.iter() {
                let ni = index(dimension, n);
                match owner[ni] {
                    Some(other) if other != swarm => {
                        result.meeting = Some(match swarm {
                            Swarm::Forward => Meeting {
                                forward: cur,
                                backward: n,
                            },
                            Swarm::Backward => Meeting {
                                forward: n,
                                backward: cur,
                            },
                        });
                        break;
                    }
                    _ => {}
                }
                let tentative = g + 1;
                if tentative >= dist[ni] {
                    continue;
                }
                dist[ni] = tentative;
                owner[ni] = Some(swarm);
                own_map.insert(n, cur);
                open.push((n, swarm), tentative);

                if n != blocked && Some(n) != ignore {
                    let mut grid = self.grid.lock();
                    if !grid.is(n, State::Closed) {
                        grid.set_open(n);
                    }
                }
            }

            if cur != start && cur != end && Some(cur) != ignore {
                self.grid.lock().set_closed(cur);
            }
            self.timer.stop(true);
            if result.meeting.is_some() {
                break;
            }
        }
        self.nbuf = nbuf;

        match result.meeting {
            Some(m) => {
                log::debug!("swarms met at {} / {}", m.forward, m.backward);
                if draw {
                    self.draw_bidirectional(&result);
                }
            }
            None => log::debug!("{end} unreachable from {start}"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pathvis_core::{Grid, SharedGrid};

    use super::*;

    fn searcher(grid: Grid) -> (SharedGrid, Searcher<'static>) {
        let shared = SharedGrid::new(grid);
        let s = Searcher::new(shared.clone()).with_path_delay(Duration::ZERO);
        (shared, s)
    }

    fn assert_contiguous(path: &[Pos]) {
        for w in path.windows(2) {
            let d = w[1] - w[0];
            assert_eq!(d.row.abs() + d.col.abs(), 1, "gap between {} and {}", w[0], w[1]);
        }
    }

    #[test]
    fn open_grid_length() {
        let (shared, mut s) = searcher(Grid::new(5));
        let start = Pos::new(0, 0);
        let end = Pos::new(4, 4);
        let bi = s.bi_dijkstra(start, end, None, true);
        let path = bi.path().unwrap();
        assert_eq!(path.len() - 1, 8);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_contiguous(&path);

        let g = shared.lock();
        assert_eq!(g.count(State::Path), 7);
        assert!(!g.is(start, State::Path));
        assert!(!g.is(end, State::Path));
    }

    #[test]
    fn matches_dijkstra_around_walls() {
        let mut grid = Grid::new(9);
        for row in 0..8 {
            grid.set_wall(Pos::new(row, 3));
        }
        for row in 1..9 {
            grid.set_wall(Pos::new(row, 6));
        }
        let start = Pos::new(0, 0);
        let end = Pos::new(8, 8);
        let (_, mut s) = searcher(grid.clone());
        let d = s.dijkstra(start, end, None, false).path_len(end);
        let (_, mut s) = searcher(grid);
        let bi = s.bi_dijkstra(start, end, None, false);
        assert_contiguous(&bi.path().unwrap());
        assert!(d.is_some());
        assert_eq!(bi.path_len(), d);
    }

    #[test]
    fn adjacent_endpoints_meet_immediately() {
        let (shared, mut s) = searcher(Grid::new(3));
        let bi = s.bi_dijkstra(Pos::new(1, 1), Pos::new(1, 2), None, true);
        assert_eq!(bi.path_len(), Some(1));
        assert_eq!(shared.lock().count(State::Path), 0);
    }

    #[test]
    fn start_equals_end() {
        let (shared, mut s) = searcher(Grid::new(3));
        let p = Pos::new(0, 1);
        let bi = s.bi_dijkstra(p, p, None, true);
        assert_eq!(bi.path(), Some(vec![p]));
        assert_eq!(shared.lock().count(State::Path), 0);
    }

    #[test]
    fn separated_endpoints_never_meet() {
        let mut grid = Grid::new(5);
        for row in 0..5 {
            grid.set_wall(Pos::new(row, 2));
        }
        let (_, mut s) = searcher(grid);
        let bi = s.bi_dijkstra(Pos::new(0, 0), Pos::new(4, 4), None, true);
        assert_eq!(bi.meeting, None);
        assert_eq!(bi.path(), None);
        assert!(!bi.forward.is_empty());
        assert!(!bi.backward.is_empty());
    }

    #[test]
    fn null_endpoint() {
        let (_, mut s) = searcher(Grid::new(3));
        let bi = s.bi_dijkstra(Pos::new(0, 0), Pos::NULL, None, true);
        assert_eq!(bi, BiSearch::default());
    }

    #[test]
    fn empty_ignore_cell_stays_empty() {
        let (shared, mut s) = searcher(Grid::new(6));
        let ignore = Pos::new(0, 1);
        let bi = s.bi_dijkstra(Pos::new(0, 0), Pos::new(5, 5), Some(ignore), false);
        assert_eq!(bi.path_len(), Some(10));
        assert_eq!(shared.lock().state(ignore), Some(State::Empty));
    }

    #[test]
    fn endpoints_keep_their_marks() {
        let mut grid = Grid::new(6);
        let start = Pos::new(0, 0);
        let end = Pos::new(5, 5);
        let ignore = Pos::new(2, 2);
        grid.set_start(start);
        grid.set_end(end);
        grid.set_mid(ignore);
        let (shared, mut s) = searcher(grid);
        s.bi_dijkstra(start, end, Some(ignore), false);
        let g = shared.lock();
        assert_eq!(g.state(start), Some(State::Start));
        assert_eq!(g.state(end), Some(State::End));
        assert_eq!(g.state(ignore), Some(State::Mid));
    }
}
