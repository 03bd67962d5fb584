//! Statistics collection and reporting
//!
//! Per-run counters kept by the controller and returned in the final report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Counters for a single simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Steps whose text was published
    pub steps_started: usize,
    /// Steps that reached execution (message steps included)
    pub steps_executed: usize,
    /// Engine calls that succeeded
    pub engine_successes: usize,
    /// Engine calls rejected with a queue error
    pub engine_failures: usize,
    /// Waiting bookings promoted into a freed seat
    pub promotions: usize,
    /// Pacing waits cut short by a skip request
    pub skipped_waits: usize,
    /// Wall-clock length of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Create an empty counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step announcement
    pub fn record_step_started(&mut self) {
        self.steps_started += 1;
    }

    /// Record a step that reached execution
    pub fn record_step_executed(&mut self) {
        self.steps_executed += 1;
    }

    /// Record an engine call's outcome
    pub fn record_engine_result(&mut self, success: bool) {
        if success {
            self.engine_successes += 1;
        } else {
            self.engine_failures += 1;
        }
    }

    /// Record a FIFO promotion
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Record a wait ended by skip
    pub fn record_skipped_wait(&mut self) {
        self.skipped_waits += 1;
    }

    /// Set the run duration
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Total engine calls made
    pub fn engine_calls(&self) -> usize {
        self.engine_successes + self.engine_failures
    }

    /// Share of engine calls that succeeded
    pub fn success_percentage(&self) -> f64 {
        if self.engine_calls() == 0 {
            0.0
        } else {
            (self.engine_successes as f64 / self.engine_calls() as f64) * 100.0
        }
    }

    /// One-line summary for the CLI
    pub fn summary(&self) -> String {
        format!(
            "Run Summary: {}/{} steps executed | Engine calls: {} ({} ok, {} rejected, {:.1}% success) | Promotions: {} | Skipped waits: {} | Elapsed: {:.2}s",
            self.steps_executed,
            self.steps_started,
            self.engine_calls(),
            self.engine_successes,
            self.engine_failures,
            self.success_percentage(),
            self.promotions,
            self.skipped_waits,
            self.elapsed.as_secs_f64()
        )
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Statistics:")?;
        writeln!(f, "  Steps Started: {}", self.steps_started)?;
        writeln!(f, "  Steps Executed: {}", self.steps_executed)?;
        writeln!(
            f,
            "  Engine Successes: {} ({:.1}%)",
            self.engine_successes,
            self.success_percentage()
        )?;
        writeln!(f, "  Engine Failures: {}", self.engine_failures)?;
        writeln!(f, "  Promotions: {}", self.promotions)?;
        write!(f, "  Skipped Waits: {}", self.skipped_waits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_default() {
        let stats = RunStatistics::new();
        assert_eq!(stats.engine_calls(), 0);
        assert_eq!(stats.success_percentage(), 0.0);
    }

    #[test]
    fn test_statistics_counters() {
        let mut stats = RunStatistics::new();
        stats.record_step_started();
        stats.record_step_started();
        stats.record_step_executed();
        stats.record_engine_result(true);
        stats.record_engine_result(true);
        stats.record_engine_result(true);
        stats.record_engine_result(false);
        stats.record_promotion();
        stats.record_skipped_wait();

        assert_eq!(stats.steps_started, 2);
        assert_eq!(stats.steps_executed, 1);
        assert_eq!(stats.engine_calls(), 4);
        assert_eq!(stats.success_percentage(), 75.0);
        assert_eq!(stats.promotions, 1);
        assert_eq!(stats.skipped_waits, 1);
    }

    #[test]
    fn test_statistics_summary_and_display() {
        let mut stats = RunStatistics::new();
        stats.record_step_started();
        stats.record_step_executed();
        stats.record_engine_result(false);
        stats.set_elapsed(Duration::from_millis(1500));

        let summary = stats.summary();
        assert!(summary.contains("1/1 steps executed"));
        assert!(summary.contains("0 ok, 1 rejected"));
        assert!(summary.contains("Elapsed: 1.50s"));

        let display = stats.to_string();
        assert!(display.starts_with("Run Statistics:"));
        assert!(display.contains("Engine Failures: 1"));
    }

    #[test]
    fn test_statistics_serialization() {
        let mut stats = RunStatistics::new();
        stats.record_promotion();
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: RunStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stats);
    }
}
