use pathvis_core::Pos;

use crate::predecessors::PredecessorMap;
use crate::searcher::Searcher;

impl Searcher<'_> {
    /// A* search from `start` to `end` guided by the Manhattan distance.
    ///
    /// Marking and failure behaviour match [`dijkstra`](Self::dijkstra).
    /// The heuristic is admissible on a 4-connected grid, so path lengths
    /// agree with Dijkstra's.
    pub fn astar(
        &mut self,
        start: Pos,
        end: Pos,
        ignore: Option<Pos>,
        draw: bool,
    ) -> PredecessorMap {
        self.single_source(start, end, ignore, draw, true)
    }
}
