//! Worker-thread dispatch of searches and maze generation.
//!
//! The host configures endpoints, calls [`Engine::run`] and keeps drawing
//! whatever the grid's pending-update set reports. The worker sleeps on a
//! condition variable until a request arrives, executes it against the
//! shared grid (locking per cell write), publishes the timing snapshot and
//! raises the finished flag.
//!
//! ```text
//!  host thread                         worker thread
//!  ───────────                         ─────────────
//!  set_start / set_end ─┐
//!  run(phase, algo) ────┼──▶ Control ──▶ wait ─▶ take job ─▶ execute
//!  check_finished ◀─────┘      ▲                               │
//!  drain_updates ◀── SharedGrid ◀──────── per-cell writes ◀────┘
//!                              └───────── finish (timer, flag) ◀┘
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pathvis_core::{Pos, SharedGrid};
use pathvis_maze::{MazeConfig, MazeGen};
use pathvis_paths::{Searcher, TimerStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::control::{Algorithm, Control, Job, Phase, endpoint};
use crate::delay::Delay;
use crate::error::EngineError;

struct Shared {
    control: Mutex<Control>,
    /// Signalled on new requests, finished runs and shutdown.
    wake: Condvar,
    config: EngineConfig,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report the path-drawing stage while `request` is still current.
    fn drawing(&self, request: u64) {
        let mut c = self.lock();
        if c.request == request {
            c.algorithm = Algorithm::BestPath;
        }
    }

    /// Publish a job's result, unless a newer request superseded it.
    fn finish(&self, job: &Job, timer: TimerStats) {
        let mut c = self.lock();
        if c.running == Some(job.request) {
            c.running = None;
        }
        if c.request == job.request {
            c.timer = timer;
            c.algorithm = job.algorithm;
            c.last_algorithm = Some(job.algorithm);
            match job.phase {
                Phase::Algorithm => c.path_delay = self.config.path_delay.as_duration(),
                Phase::Maze => c.maze_delay = self.config.maze_delay.as_duration(),
                Phase::None => {}
            }
            c.finished = true;
            c.phase = Phase::None;
        } else {
            log::debug!("request {} superseded by {}", job.request, c.request);
        }
        drop(c);
        self.wake.notify_all();
    }
}

/// Dispatches searches and maze runs, optionally on a background worker.
pub struct Engine {
    shared: Arc<Shared>,
    grid: SharedGrid,
    worker: Option<JoinHandle<()>>,
}

impl Engine {
    /// Create an engine without a worker. Requests are executed with
    /// [`run_blocking`](Self::run_blocking).
    pub fn new(grid: SharedGrid, config: EngineConfig) -> Self {
        let control = Control::new(
            config.path_delay.as_duration(),
            config.maze_delay.as_duration(),
        );
        Self {
            shared: Arc::new(Shared {
                control: Mutex::new(control),
                wake: Condvar::new(),
                config,
            }),
            grid,
            worker: None,
        }
    }

    /// Create an engine and spawn its worker thread.
    pub fn start(grid: SharedGrid, config: EngineConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new(grid, config);
        let shared = Arc::clone(&engine.shared);
        let grid = engine.grid.clone();
        let handle = thread::Builder::new()
            .name("pathvis-worker".into())
            .spawn(move || worker_loop(&shared, &grid))?;
        engine.worker = Some(handle);
        log::info!("engine worker started");
        Ok(engine)
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    /// Whether a background worker is attached.
    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Ask the worker to run `algorithm` in `phase`. Clears the finished
    /// flag and returns immediately.
    pub fn run(&self, phase: Phase, algorithm: Algorithm) {
        let mut c = self.shared.lock();
        c.phase = phase;
        c.algorithm = algorithm;
        c.finished = false;
        c.request += 1;
        log::debug!("request {}: {phase:?} {algorithm}", c.request);
        drop(c);
        self.shared.wake.notify_all();
    }

    /// Run a request on the calling thread and return its timing.
    ///
    /// The worker, if any, does not pick this request up. A job the worker
    /// is still executing keeps writing to the grid meanwhile.
    pub fn run_blocking(&self, phase: Phase, algorithm: Algorithm) -> TimerStats {
        let job = {
            let mut c = self.shared.lock();
            c.phase = phase;
            c.algorithm = algorithm;
            c.finished = false;
            c.request += 1;
            c.take_job()
        };
        let timer = execute(&self.shared, &self.grid, &job);
        self.shared.finish(&job, timer);
        timer
    }

    /// Block until the current request has finished or `timeout` elapses.
    /// Returns the finished flag.
    pub fn wait_finished(&self, timeout: Duration) -> bool {
        let c = self.shared.lock();
        let (c, _) = self
            .shared
            .wake
            .wait_timeout_while(c, timeout, |c| !c.finished)
            .unwrap_or_else(PoisonError::into_inner);
        c.finished
    }

    /// Return to Idle: clear phase, algorithm, endpoints, the finished flag
    /// and restore default delays. A run in progress completes but no
    /// longer reports back.
    pub fn reset(&self) {
        let mut c = self.shared.lock();
        let config = &self.shared.config;
        *c = Control {
            request: c.request + 1,
            running: c.running,
            shutdown: c.shutdown,
            ..Control::new(config.path_delay.as_duration(), config.maze_delay.as_duration())
        };
        drop(c);
        self.shared.wake.notify_all();
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// Set the start cell. `None` or [`Pos::NULL`] unsets it.
    pub fn set_start(&self, pos: impl Into<Option<Pos>>) {
        self.shared.lock().start = endpoint(pos.into());
    }

    /// Set the waypoint. With a waypoint set, searches route start → mid → end.
    pub fn set_mid(&self, pos: impl Into<Option<Pos>>) {
        self.shared.lock().mid = endpoint(pos.into());
    }

    pub fn set_end(&self, pos: impl Into<Option<Pos>>) {
        self.shared.lock().end = endpoint(pos.into());
    }

    /// Set a cell that direct searches never mark Open or Closed.
    pub fn set_ignore(&self, pos: impl Into<Option<Pos>>) {
        self.shared.lock().ignore = endpoint(pos.into());
    }

    /// Set all four endpoints under one lock.
    pub fn set_endpoints(
        &self,
        start: impl Into<Option<Pos>>,
        mid: impl Into<Option<Pos>>,
        end: impl Into<Option<Pos>>,
        ignore: impl Into<Option<Pos>>,
    ) {
        let mut c = self.shared.lock();
        c.start = endpoint(start.into());
        c.mid = endpoint(mid.into());
        c.end = endpoint(end.into());
        c.ignore = endpoint(ignore.into());
    }

    pub fn start_pos(&self) -> Option<Pos> {
        self.shared.lock().start
    }

    pub fn mid_pos(&self) -> Option<Pos> {
        self.shared.lock().mid
    }

    pub fn end_pos(&self) -> Option<Pos> {
        self.shared.lock().end
    }

    pub fn ignore_pos(&self) -> Option<Pos> {
        self.shared.lock().ignore
    }

    // -----------------------------------------------------------------------
    // Delays
    // -----------------------------------------------------------------------

    /// Delay between Path marks for the next search only.
    pub fn set_path_delay(&self, delay: impl Into<Duration>) {
        self.shared.lock().path_delay = delay.into();
    }

    /// Delay between maze writes for the next maze only.
    pub fn set_maze_delay(&self, delay: impl Into<Duration>) {
        self.shared.lock().maze_delay = delay.into();
    }

    /// [`set_path_delay`](Self::set_path_delay) from an amount and unit
    /// symbol such as `"ms"`.
    pub fn set_path_delay_in(&self, amount: u64, unit: &str) -> Result<(), EngineError> {
        self.set_path_delay(Delay::try_from_unit(amount, unit)?);
        Ok(())
    }

    /// [`set_maze_delay`](Self::set_maze_delay) from an amount and unit
    /// symbol such as `"us"`.
    pub fn set_maze_delay_in(&self, amount: u64, unit: &str) -> Result<(), EngineError> {
        self.set_maze_delay(Delay::try_from_unit(amount, unit)?);
        Ok(())
    }

    pub fn path_delay(&self) -> Duration {
        self.shared.lock().path_delay
    }

    pub fn maze_delay(&self) -> Duration {
        self.shared.lock().maze_delay
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    pub fn check_phase(&self) -> Phase {
        self.shared.lock().phase
    }

    /// The selected algorithm. Reads [`Algorithm::BestPath`] while a path
    /// is being drawn.
    pub fn check_algorithm(&self) -> Algorithm {
        self.shared.lock().algorithm
    }

    pub fn check_finished(&self) -> bool {
        self.shared.lock().finished
    }

    /// The algorithm of the most recently finished request.
    pub fn last_algorithm(&self) -> Option<Algorithm> {
        self.shared.lock().last_algorithm
    }

    /// Timing of the most recently finished request.
    pub fn timer(&self) -> TimerStats {
        self.shared.lock().timer
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Stop the worker after its current job and join it.
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        self.shared.lock().shutdown = true;
        self.shared.wake.notify_all();
        handle.join().map_err(|_| EngineError::WorkerPanicked)?;
        log::info!("engine worker stopped");
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("{e}");
        }
    }
}

fn worker_loop(shared: &Shared, grid: &SharedGrid) {
    loop {
        let job = {
            let mut c = shared.lock();
            while !c.shutdown && !c.has_work() {
                c = shared.wake.wait(c).unwrap_or_else(PoisonError::into_inner);
            }
            if c.shutdown {
                break;
            }
            c.take_job()
        };
        let timer = execute(shared, grid, &job);
        shared.finish(&job, timer);
    }
}

fn execute(shared: &Shared, grid: &SharedGrid, job: &Job) -> TimerStats {
    log::debug!("executing request {}: {:?} {}", job.request, job.phase, job.algorithm);
    match job.phase {
        Phase::Algorithm => search(shared, grid, job),
        Phase::Maze => maze(shared, grid, job),
        Phase::None => TimerStats::default(),
    }
}

fn search(shared: &Shared, grid: &SharedGrid, job: &Job) -> TimerStats {
    let Some(kind) = job.algorithm.search_kind() else {
        log::warn!("{} is not a search algorithm", job.algorithm);
        return TimerStats::default();
    };
    let start = job.start.unwrap_or(Pos::NULL);
    let end = job.end.unwrap_or(Pos::NULL);
    let mut searcher = Searcher::new(grid.clone())
        .with_path_delay(job.path_delay)
        .on_path_drawing(|| shared.drawing(job.request));

    let reached = match job.mid {
        Some(mid) => {
            let (a, b) = searcher.start_mid_end(kind, start, mid, end);
            a.reached() && b.reached()
        }
        None => searcher.run(kind, start, end, job.ignore, true).reached(),
    };
    let timer = searcher.timer();
    log::info!("{kind}: {} ({timer})", if reached { "path found" } else { "no path" });
    timer
}

fn maze(shared: &Shared, grid: &SharedGrid, job: &Job) -> TimerStats {
    if job.algorithm != Algorithm::RecursiveMaze {
        log::warn!("{} is not a maze algorithm", job.algorithm);
        return TimerStats::default();
    }
    let config = shared.config.maze(job.maze_delay);
    match shared.config.seed {
        Some(seed) => generate(MazeGen::new(grid.clone(), StdRng::seed_from_u64(seed)), config),
        None => generate(MazeGen::new(grid.clone(), rand::rng()), config),
    }
}

fn generate<R: Rng>(mg: MazeGen<R>, config: MazeConfig) -> TimerStats {
    let mut mg = mg.with_config(config);
    mg.recursive_division();
    mg.timer()
}
