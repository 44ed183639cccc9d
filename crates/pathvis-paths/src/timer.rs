//! Per-run stopwatch statistics.
//!
//! A search resets the timer, measures its setup without counting it,
//! then measures each loop iteration. The numbers are observational only.

use std::fmt;
use std::time::{Duration, Instant};

/// Snapshot of a [`RunTimer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerStats {
    /// Everything measured, including uncounted setup.
    pub total: Duration,
    /// Counted measurements, usually loop iterations.
    pub count: u64,
    /// `total / count`, zero until something was counted.
    pub average: Duration,
    /// Shortest non-zero measurement.
    pub min: Option<Duration>,
    /// Longest non-zero measurement.
    pub max: Option<Duration>,
}

/// Render a duration in the largest unit that keeps it above one.
fn human(d: Duration) -> String {
    let ns = d.as_nanos() as f64;
    if ns > 60e9 {
        format!("{:.2}min", ns / 60e9)
    } else if ns > 1e9 {
        format!("{:.2}s", ns / 1e9)
    } else if ns > 1e6 {
        format!("{:.2}ms", ns / 1e6)
    } else if ns > 1e3 {
        format!("{:.2}us", ns / 1e3)
    } else {
        format!("{ns:.2}ns")
    }
}

impl fmt::Display for TimerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |d: Option<Duration>| d.map_or_else(|| "-".to_string(), human);
        write!(
            f,
            "total {} | avg {} | min {} | max {} | count {}",
            human(self.total),
            human(self.average),
            opt(self.min),
            opt(self.max),
            self.count
        )
    }
}

/// Accumulating stopwatch.
#[derive(Debug, Clone)]
pub struct RunTimer {
    started: Instant,
    stats: TimerStats,
}

impl RunTimer {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            stats: TimerStats::default(),
        }
    }

    /// Clear all statistics and start the stopwatch.
    pub fn reset(&mut self) {
        self.stats = TimerStats::default();
        self.started = Instant::now();
    }

    /// Restart the stopwatch without touching the statistics.
    pub fn start(&mut self) {
        self.started = Instant::now();
    }

    /// Add the time since [`start`](Self::start) to the total. Only
    /// counted measurements bump `count`.
    pub fn stop(&mut self, count: bool) {
        self.record(self.started.elapsed(), count);
    }

    fn record(&mut self, elapsed: Duration, count: bool) {
        let s = &mut self.stats;
        s.total += elapsed;
        if count {
            s.count += 1;
        }
        if s.count > 0 {
            s.average = s.total / s.count as u32;
        }
        if !elapsed.is_zero() {
            s.min = Some(s.min.map_or(elapsed, |m| m.min(elapsed)));
            s.max = Some(s.max.map_or(elapsed, |m| m.max(elapsed)));
        }
    }

    pub fn stats(&self) -> TimerStats {
        self.stats
    }
}

impl Default for RunTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncounted_setup_adds_to_total_only() {
        let mut t = RunTimer::new();
        t.record(Duration::from_micros(30), false);
        t.record(Duration::from_micros(10), true);
        t.record(Duration::from_micros(20), true);
        let s = t.stats();
        assert_eq!(s.total, Duration::from_micros(60));
        assert_eq!(s.count, 2);
        assert_eq!(s.average, Duration::from_micros(30));
        assert_eq!(s.min, Some(Duration::from_micros(10)));
        assert_eq!(s.max, Some(Duration::from_micros(30)));
    }

    #[test]
    fn zero_measurements_skip_min_max() {
        let mut t = RunTimer::new();
        t.record(Duration::ZERO, true);
        assert_eq!(t.stats().count, 1);
        assert_eq!(t.stats().min, None);
        assert_eq!(t.stats().max, None);
    }

    #[test]
    fn reset_clears() {
        let mut t = RunTimer::new();
        t.start();
        t.stop(true);
        t.reset();
        assert_eq!(t.stats(), TimerStats::default());
    }

    #[test]
    fn display_picks_units() {
        assert_eq!(human(Duration::from_nanos(500)), "500.00ns");
        assert_eq!(human(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(human(Duration::from_secs(90)), "1.50min");
        let s = TimerStats::default().to_string();
        assert!(s.contains("count 0"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn stats_round_trip() {
        let mut t = RunTimer::new();
        t.record(Duration::from_millis(3), true);
        let json = serde_json::to_string(&t.stats()).unwrap();
        let back: TimerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t.stats());
    }
}
