use pathvis_maze::MazeConfig;

use crate::delay::{Delay, TimeUnit};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Pause between two Path marks; restored after every search.
    #[cfg_attr(feature = "serde", serde(default = "default_path_delay"))]
    pub path_delay: Delay,

    /// Pause between two maze writes; restored after every maze.
    #[cfg_attr(feature = "serde", serde(default = "default_maze_delay"))]
    pub maze_delay: Delay,

    /// Chamber side below which the maze stops dividing.
    #[cfg_attr(feature = "serde", serde(default = "default_division_limit"))]
    pub division_limit: i32,

    /// Gaps punched per maze division.
    #[cfg_attr(feature = "serde", serde(default = "default_num_gaps"))]
    pub num_gaps: usize,

    /// Fixed seed for maze gaps. `None` draws from the thread RNG.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

fn default_path_delay() -> Delay {
    Delay::new(3, TimeUnit::Millis)
}

fn default_maze_delay() -> Delay {
    Delay::new(250, TimeUnit::Micros)
}

fn default_division_limit() -> i32 {
    3
}

fn default_num_gaps() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path_delay: default_path_delay(),
            maze_delay: default_maze_delay(),
            division_limit: default_division_limit(),
            num_gaps: default_num_gaps(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// A configuration with both delays set to zero, for headless runs.
    pub fn instant() -> Self {
        Self {
            path_delay: Delay::new(0, TimeUnit::Millis),
            maze_delay: Delay::new(0, TimeUnit::Micros),
            ..Self::default()
        }
    }

    /// Maze parameters using `delay` between writes.
    pub fn maze(&self, delay: std::time::Duration) -> MazeConfig {
        MazeConfig {
            division_limit: self.division_limit,
            num_gaps: self.num_gaps,
            delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.path_delay.as_duration(), Duration::from_millis(3));
        assert_eq!(c.maze_delay.as_duration(), Duration::from_micros(250));
        assert_eq!(c.division_limit, 3);
        assert_eq!(c.num_gaps, 3);
        assert_eq!(c.seed, None);
        assert_eq!(c.maze(Duration::ZERO), MazeConfig { delay: Duration::ZERO, ..MazeConfig::default() });
    }

    #[test]
    fn instant_has_no_delay() {
        let c = EngineConfig::instant();
        assert!(c.path_delay.as_duration().is_zero());
        assert!(c.maze_delay.as_duration().is_zero());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let c: EngineConfig =
            serde_json::from_str(r#"{"path_delay": {"amount": 10, "unit": "ms"}, "seed": 7}"#).unwrap();
        assert_eq!(c.path_delay, Delay::new(10, TimeUnit::Millis));
        assert_eq!(c.maze_delay, default_maze_delay());
        assert_eq!(c.num_gaps, 3);
        assert_eq!(c.seed, Some(7));
    }
}
