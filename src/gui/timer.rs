//! Game clock.

use std::time::{Duration, Instant};

/// Wall-clock time spent on the current game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stopwatch {
    start: Instant,
    /// Final time, once the game is over.
    stopped: Option<Duration>,
}
impl Stopwatch {
    /// Returns a stopwatch started at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            stopped: None,
        }
    }
    /// Sets the time back to zero and starts counting again.
    pub fn restart(&mut self, now: Instant) {
        *self = Self::new(now);
    }
    /// Freezes the time. Does nothing if already stopped.
    pub fn stop(&mut self, now: Instant) {
        if self.stopped.is_none() {
            self.stopped = Some(now.saturating_duration_since(self.start));
        }
    }
    /// Returns the time shown at `now`.
    pub fn elapsed(self, now: Instant) -> Duration {
        self.stopped
            .unwrap_or_else(|| now.saturating_duration_since(self.start))
    }
}

/// Formats a duration as whole `mm:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(100 * 60 + 5)), "100:05");
    }

    #[test]
    fn test_stop_and_restart() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new(t0);
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(3)), Duration::from_secs(3));
        sw.stop(t0 + Duration::from_secs(5));
        sw.stop(t0 + Duration::from_secs(8));
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(30)), Duration::from_secs(5));
        sw.restart(t0 + Duration::from_secs(30));
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(31)), Duration::from_secs(1));
    }
}
