//! Engine harness for pathvis.
//!
//! [`Engine`] owns the control block a host talks to: endpoints, delays,
//! the requested [`Phase`] and [`Algorithm`], and the finished flag. A
//! background worker executes requests against a shared grid while the
//! host renders the cells that changed.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use pathvis_core::{Grid, Pos, SharedGrid};
//! use pathvis_engine::{Algorithm, Engine, EngineConfig, Phase};
//!
//! let grid = SharedGrid::new(Grid::new(32));
//! let engine = Engine::start(grid.clone(), EngineConfig::default())?;
//! engine.set_start(Pos::new(0, 0));
//! engine.set_end(Pos::new(31, 31));
//! engine.run(Phase::Algorithm, Algorithm::AStar);
//! while !engine.wait_finished(Duration::from_millis(16)) {
//!     for _cell in grid.with(|g| g.drain_updates()) {
//!         // repaint
//!     }
//! }
//! # Ok::<(), pathvis_engine::EngineError>(())
//! ```

pub mod config;
pub mod control;
pub mod delay;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use control::{Algorithm, Phase};
pub use delay::{Delay, TimeUnit};
pub use engine::Engine;
pub use error::{DelayError, EngineError};
