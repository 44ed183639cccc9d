use std::collections::HashMap;

use pathvis_core::Pos;

/// Cell → the cell it was first reached from with its best distance.
///
/// Built fresh by every search. A target missing from the map (and not
/// equal to the source) was not reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredecessorMap {
    source: Option<Pos>,
    came_from: HashMap<Pos, Pos>,
}

impl PredecessorMap {
    /// A map for a search that never ran, e.g. because an endpoint was null.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(source: Pos) -> Self {
        Self {
            source: Some(source),
            came_from: HashMap::new(),
        }
    }

    pub fn source(&self) -> Option<Pos> {
        self.source
    }

    /// Record that `cell` was reached from `from`, returning the previous
    /// predecessor if any.
    pub fn insert(&mut self, cell: Pos, from: Pos) -> Option<Pos> {
        self.came_from.insert(cell, from)
    }

    pub fn get(&self, cell: Pos) -> Option<Pos> {
        self.came_from.get(&cell).copied()
    }

    pub fn contains(&self, cell: Pos) -> bool {
        self.came_from.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.came_from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.came_from.is_empty()
    }

    /// Whether `target` was reached.
    pub fn reaches(&self, target: Pos) -> bool {
        self.source == Some(target) || self.contains(target)
    }

    /// Predecessors of `terminal`, nearest first, ending with the source.
    /// `terminal` itself is not included.
    pub fn trace(&self, terminal: Pos) -> Vec<Pos> {
        let mut out = Vec::new();
        let mut cur = terminal;
        while let Some(prev) = self.get(cur) {
            out.push(prev);
            cur = prev;
            if out.len() > self.came_from.len() {
                log::warn!("predecessor cycle through {cur}");
                break;
            }
        }
        out
    }

    /// The path from the source to `target`, both included.
    pub fn path_to(&self, target: Pos) -> Option<Vec<Pos>> {
        if !self.reaches(target) {
            return None;
        }
        let mut path = self.trace(target);
        path.reverse();
        path.push(target);
        Some(path)
    }

    /// Number of steps from the source to `target`.
    pub fn path_len(&self, target: Pos) -> Option<usize> {
        self.path_to(target).map(|p| p.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PredecessorMap {
        let mut m = PredecessorMap::new(Pos::new(0, 0));
        m.insert(Pos::new(0, 1), Pos::new(0, 0));
        m.insert(Pos::new(0, 2), Pos::new(0, 1));
        m.insert(Pos::new(1, 2), Pos::new(0, 2));
        m
    }

    #[test]
    fn trace_runs_back_to_source() {
        let m = line();
        assert_eq!(
            m.trace(Pos::new(1, 2)),
            vec![Pos::new(0, 2), Pos::new(0, 1), Pos::new(0, 0)]
        );
        assert!(m.trace(Pos::new(0, 0)).is_empty());
    }

    #[test]
    fn path_to_includes_both_ends() {
        let m = line();
        assert_eq!(
            m.path_to(Pos::new(0, 2)),
            Some(vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)])
        );
        assert_eq!(m.path_len(Pos::new(1, 2)), Some(3));
        assert_eq!(m.path_len(Pos::new(0, 0)), Some(0));
        assert_eq!(m.path_to(Pos::new(4, 4)), None);
    }

    #[test]
    fn empty_map_reaches_nothing() {
        let m = PredecessorMap::empty();
        assert!(m.is_empty());
        assert_eq!(m.source(), None);
        assert!(!m.reaches(Pos::new(0, 0)));
    }
}
