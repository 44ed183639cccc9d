//! Recursive-division maze generation for pathvis grids.
//!
//! [`MazeGen`] carves a maze into a [`SharedGrid`](pathvis_core::SharedGrid)
//! one cell at a time, pausing between writes so a renderer can show the
//! walls going up. The only randomness is where gaps are punched.

pub mod chamber;
pub mod division;

pub use chamber::{Chamber, Orientation, Segment};
pub use division::{DEFAULT_MAZE_DELAY, MIN_DIVISION_LIMIT, MazeConfig, MazeGen, MazeStats};
