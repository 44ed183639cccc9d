use pathvis_core::Pos;

use crate::searcher::{Outcome, SearchKind, Searcher};

impl Searcher<'_> {
    /// Route start → mid → end with `kind`.
    ///
    /// Each leg treats the endpoint it does not use as the ignore cell, so
    /// neither search paints over it. The Start, Mid and End marks are
    /// re-applied once both legs finish, then both paths are drawn in
    /// order.
    pub fn start_mid_end(
        &mut self,
        kind: SearchKind,
        start: Pos,
        mid: Pos,
        end: Pos,
    ) -> (Outcome, Outcome) {
        let first = self.run(kind, start, mid, Some(end), false);
        let second = self.run(kind, mid, end, Some(start), false);

        {
            let mut grid = self.grid.lock();
            grid.set_start(start);
            grid.set_mid(mid);
            grid.set_end(end);
        }

        self.draw(&first);
        self.draw(&second);
        (first, second)
    }
}
