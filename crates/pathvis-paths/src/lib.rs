//! Animated shortest-path searches over a pathvis grid.
//!
//! This crate runs uniform-cost searches on a 4-connected
//! [`SharedGrid`](pathvis_core::SharedGrid) and paints their progress into
//! it as they go:
//!
//! - **Dijkstra** ([`Searcher::dijkstra`])
//! - **A\*** with a Manhattan heuristic ([`Searcher::astar`])
//! - **Bidirectional Dijkstra** ([`Searcher::bi_dijkstra`])
//! - **Start → mid → end** routing through a waypoint ([`Searcher::start_mid_end`])
//!
//! Every search returns predecessor maps rather than a bare path, so a
//! caller can rebuild the route ([`PredecessorMap::path_to`]) or have it
//! drawn with the configured delay ([`Searcher::draw`]).
//!
//! Reached cells become Open, expanded cells Closed and route cells Path.
//! Ties between equally good cells go to the one reached most recently.

mod astar;
mod best_path;
mod bidirectional;
mod dijkstra;
mod distance;
mod frontier;
mod legs;
mod predecessors;
mod searcher;
mod timer;

pub use bidirectional::{BiSearch, Meeting, Swarm};
pub use distance::manhattan;
pub use frontier::Frontier;
pub use predecessors::PredecessorMap;
pub use searcher::{DEFAULT_PATH_DELAY, Outcome, SearchKind, Searcher};
pub use timer::{RunTimer, TimerStats};
