//! A grid shared between a controlling thread and a worker.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::grid::Grid;

/// A cheaply clonable handle to a [`Grid`] behind a mutex.
///
/// Workers lock once per cell mutation or neighbour read, so a renderer on
/// another thread can drain updates while a search is still running.
#[derive(Debug, Clone)]
pub struct SharedGrid(Arc<Mutex<Grid>>);

impl SharedGrid {
    pub fn new(grid: Grid) -> Self {
        Self(Arc::new(Mutex::new(grid)))
    }

    /// Lock the grid. A poisoned lock is recovered; the grid's own
    /// transitions never leave it half-updated.
    pub fn lock(&self) -> MutexGuard<'_, Grid> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with the grid locked.
    pub fn with<T>(&self, f: impl FnOnce(&mut Grid) -> T) -> T {
        f(&mut *self.lock())
    }
}

impl From<Grid> for SharedGrid {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
