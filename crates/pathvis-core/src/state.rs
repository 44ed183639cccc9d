use std::fmt;

/// The visual/semantic state of a cell.
///
/// States are mutually exclusive: a cell is in exactly one of them at any
/// time, and [`Grid`](crate::Grid) keeps one membership set per state.
/// `Open2`/`Open3` and `Closed2`/`Closed3` are alternate frontier colours a
/// host may use to distinguish concurrent searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    #[default]
    Empty,
    Open,
    Open2,
    Open3,
    Closed,
    Closed2,
    Closed3,
    Start,
    Mid,
    End,
    Wall,
    Path,
    History,
}

impl State {
    /// Number of distinct states.
    pub const COUNT: usize = 13;

    /// Every state, in declaration order.
    pub const ALL: [State; Self::COUNT] = [
        State::Empty,
        State::Open,
        State::Open2,
        State::Open3,
        State::Closed,
        State::Closed2,
        State::Closed3,
        State::Start,
        State::Mid,
        State::End,
        State::Wall,
        State::Path,
        State::History,
    ];

    /// States left behind by a search run and cleared between runs.
    pub const SEARCH_MARKS: [State; 7] = [
        State::Open,
        State::Open2,
        State::Open3,
        State::Closed,
        State::Closed2,
        State::Closed3,
        State::Path,
    ];

    /// Dense index of this state, used for per-state tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Start, Mid and End.
    #[inline]
    pub const fn is_ordinal(self) -> bool {
        matches!(self, State::Start | State::Mid | State::End)
    }

    /// Whether a search run produced this state.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(
            self,
            State::Open
                | State::Open2
                | State::Open3
                | State::Closed
                | State::Closed2
                | State::Closed3
                | State::Path
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Empty => "empty",
            State::Open => "open",
            State::Open2 => "open2",
            State::Open3 => "open3",
            State::Closed => "closed",
            State::Closed2 => "closed2",
            State::Closed3 => "closed3",
            State::Start => "start",
            State::Mid => "mid",
            State::End => "end",
            State::Wall => "wall",
            State::Path => "path",
            State::History => "history",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense() {
        for (i, s) in State::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn classification() {
        assert!(State::Mid.is_ordinal());
        assert!(!State::Wall.is_ordinal());
        assert!(State::Closed3.is_search_mark());
        assert!(!State::History.is_search_mark());
        assert_eq!(
            State::ALL.iter().filter(|s| s.is_search_mark()).count(),
            State::SEARCH_MARKS.len()
        );
    }
}
