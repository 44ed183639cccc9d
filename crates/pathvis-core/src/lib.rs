//! Grid and cell model for pathfinding visualisation.
//!
//! A [`Grid`] is an N×N board of [`Cell`]s. Each cell is in exactly one
//! [`State`], and the grid keeps a membership set per state plus a set of
//! cells changed since a renderer last looked. [`SharedGrid`] wraps a grid
//! for use from a background worker.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod shared;
pub mod state;

pub use cell::Cell;
pub use geom::{Dir, Pos};
pub use grid::Grid;
pub use shared::SharedGrid;
pub use state::State;
