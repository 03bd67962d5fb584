//! Simulation controller
//!
//! Drives a `QueueEngine` through a scripted demonstration with timed,
//! interruptible pacing. Every wait polls the shared `SimulationControl` flags
//! at the configured poll interval, so pause, skip and stop take effect within
//! one interval. Paused time does not count toward a pacing delay.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::booking::WAITING_SEAT;
use crate::queue::{OperationReport, QueueEngine, QueueState};
use crate::sim_event;
use crate::simulation::{
    Highlights, RunStatistics, ScriptBuilder, SimulationControl, SimulationError,
    SimulationObserver, SimulationResult, SimulationStep, StepNotice, StepResult,
};
use crate::types::{Pacing, SimulationConfig, SimulationState, StepKind};

/// Text published when the script runs to the end
pub const COMPLETION_MESSAGE: &str =
    "✅ Simulation Complete!\nQueue operations demonstrated FIFO order.";

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// `Completed` or `Stopped`
    pub outcome: SimulationState,
    /// Number of steps in the script
    pub steps_total: usize,
    /// Run counters
    pub statistics: RunStatistics,
    /// Queue snapshot after the last executed step
    pub final_state: QueueState,
}

impl SimulationReport {
    /// Whether every step ran
    pub fn completed(&self) -> bool {
        self.outcome == SimulationState::Completed
    }

    /// Write the report as pretty-printed JSON followed by a newline
    pub fn write_json<W: Write>(&self, writer: &mut W) -> SimulationResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Runs demonstration scripts against a queue engine
#[derive(Debug)]
pub struct SimulationController {
    sample_names: Vec<String>,
    pacing: Pacing,
    seed: Option<u64>,
    rng: StdRng,
    control: SimulationControl,
    published_state: SimulationState,
}

impl SimulationController {
    /// Create a controller from a validated configuration
    #[instrument(skip(config), fields(max_seats = config.max_seats, seed = ?config.seed))]
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        Ok(Self {
            sample_names: config.sample_names.clone(),
            pacing: config.pacing(),
            seed: config.seed,
            rng,
            control: SimulationControl::new(),
            published_state: SimulationState::Idle,
        })
    }

    /// Use an existing control handle
    pub fn with_control(mut self, control: SimulationControl) -> Self {
        self.published_state = control.state();
        self.control = control;
        self
    }

    /// Override the pacing intervals
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Handle for steering a run from another thread or an observer
    pub fn control(&self) -> SimulationControl {
        self.control.clone()
    }

    /// Pacing intervals in effect
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Current lifecycle state
    pub fn state(&self) -> SimulationState {
        self.control.state()
    }

    /// Pause the run
    pub fn pause(&self) {
        self.control.pause();
    }

    /// Resume a paused run
    pub fn resume(&self) {
        self.control.resume();
    }

    /// End the current wait immediately
    pub fn skip(&self) {
        self.control.skip();
    }

    /// Stop the run at the next wait
    pub fn stop(&self) {
        self.control.stop();
    }

    /// Reset the engine, build a fresh script and execute it
    ///
    /// Returns once the run reaches `Completed` or `Stopped` and the state
    /// is back to `Idle`. Engine rejections are counted and logged; they
    /// never end the run.
    #[instrument(skip(self, engine, observer), fields(seed = ?self.seed))]
    pub fn run(
        &mut self,
        engine: &mut QueueEngine,
        observer: &mut dyn SimulationObserver,
    ) -> SimulationResult<SimulationReport> {
        if !self.control.try_begin() {
            return Err(SimulationError::AlreadyRunning);
        }

        let started = Instant::now();
        let steps = match ScriptBuilder::new(self.sample_names.clone(), engine.capacity().max_seats)
            .build(&mut self.rng)
        {
            Ok(steps) => steps,
            Err(e) => {
                self.control.set_state(SimulationState::Idle);
                return Err(e);
            }
        };
        let total = steps.len();

        engine.reset_queue();

        let mut statistics = RunStatistics::new();
        let pacing = self.pacing;
        sim_event!(info, "Simulation started", steps = total);
        self.publish(SimulationState::Running, observer);

        let mut stopped = false;
        for (offset, step) in steps.iter().enumerate() {
            if self.control.is_stopped() {
                stopped = true;
                break;
            }

            let notice = StepNotice {
                index: offset + 1,
                total,
                kind: step.kind,
                message: step.message.clone(),
            };
            statistics.record_step_started();
            observer.on_step(&notice);

            if !self.wait(pacing.step_delay, &mut statistics, observer) {
                stopped = true;
                break;
            }

            let result = execute_step(notice.index, step, engine, &mut statistics);
            statistics.record_step_executed();
            observer.on_step_executed(&result);

            if !self.wait(pacing.settle_delay, &mut statistics, observer) {
                stopped = true;
                break;
            }
        }

        let outcome = if stopped {
            sim_event!(info, "Simulation stopped", steps_executed = statistics.steps_executed);
            self.transition(SimulationState::Stopped, observer);
            SimulationState::Stopped
        } else {
            let final_state = engine.queue_state();
            observer.on_complete(COMPLETION_MESSAGE, &final_state);
            // A stop here only cuts the hold short
            self.wait(pacing.completion_delay, &mut statistics, observer);
            self.transition(SimulationState::Completed, observer);
            SimulationState::Completed
        };

        statistics.set_elapsed(started.elapsed());
        info!("{}", statistics.summary());
        self.transition(SimulationState::Idle, observer);

        Ok(SimulationReport { outcome, steps_total: total, statistics, final_state: engine.queue_state() })
    }

    /// Wait `duration`, returning false if a stop was requested
    fn wait(
        &mut self,
        duration: Duration,
        statistics: &mut RunStatistics,
        observer: &mut dyn SimulationObserver,
    ) -> bool {
        let poll = self.pacing.poll_interval.max(Duration::from_millis(1));
        let mut remaining = duration;

        loop {
            self.publish_external_change(observer);

            if self.control.is_stopped() {
                return false;
            }
            if self.control.take_skip() {
                statistics.record_skipped_wait();
                debug!("Wait skipped");
                return true;
            }
            if self.control.is_paused() {
                thread::sleep(poll);
                continue;
            }
            if remaining.is_zero() {
                return true;
            }

            let slice = remaining.min(poll);
            thread::sleep(slice);
            remaining -= slice;
        }
    }

    fn transition(&mut self, next: SimulationState, observer: &mut dyn SimulationObserver) {
        self.control.set_state(next);
        self.publish(next, observer);
    }

    /// Publish pause/resume changes made through the control handle
    fn publish_external_change(&mut self, observer: &mut dyn SimulationObserver) {
        let current = self.control.state();
        if current != self.published_state {
            self.publish(current, observer);
        }
    }

    fn publish(&mut self, next: SimulationState, observer: &mut dyn SimulationObserver) {
        let previous = self.published_state;
        if previous == next {
            return;
        }
        self.published_state = next;
        sim_event!(
            info,
            "Simulation state changed",
            from = tracing::field::display(previous),
            to = tracing::field::display(next),
        );
        observer.on_state_change(previous, next);
    }
}

fn execute_step(
    index: usize,
    step: &SimulationStep,
    engine: &mut QueueEngine,
    statistics: &mut RunStatistics,
) -> StepResult {
    let mut highlights = Highlights::default();
    let name = step.name.as_deref().unwrap_or_default();

    let report = match step.kind {
        StepKind::Enqueue => {
            let result = engine.enqueue(name, step.seat_number.unwrap_or(WAITING_SEAT));
            if let Ok(booked) = &result {
                highlights.added = Some(booked.booking.booking_id());
            }
            Some(OperationReport::from(&result))
        }
        StepKind::Waiting => {
            let result = engine.add_to_waiting_list(name);
            if let Ok(booked) = &result {
                highlights.added = Some(booked.booking.booking_id());
            }
            Some(OperationReport::from(&result))
        }
        StepKind::Message => None,
        StepKind::Dequeue => {
            let result = engine.dequeue();
            if let Ok(cancelled) = &result {
                highlights.leaving = Some(cancelled.cancelled.booking_id());
                if let Some(promoted) = &cancelled.promoted {
                    highlights.promoted = Some(promoted.booking_id());
                    statistics.record_promotion();
                }
            }
            Some(OperationReport::from(&result))
        }
    };

    if let Some(report) = &report {
        statistics.record_engine_result(report.success);
        if report.success {
            debug!(step = index, kind = %step.kind, "{}", report.message);
        } else {
            warn!(step = index, kind = %step.kind, "Step rejected: {}", report.message);
        }
    }

    StepResult { index, kind: step.kind, report, highlights, state: engine.queue_state() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{NoopObserver, RecordingObserver};
    use crate::types::QueueCapacity;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig { seed: Some(seed), ..SimulationConfig::default() }
    }

    fn instant_controller(seed: u64) -> SimulationController {
        SimulationController::new(&config(seed)).unwrap().with_pacing(Pacing::instant())
    }

    #[test]
    fn test_controller_rejects_invalid_config() {
        let config = SimulationConfig { max_seats: 0, ..SimulationConfig::default() };
        let error = SimulationController::new(&config).unwrap_err();
        assert_eq!(error.category(), "Configuration");
    }

    #[test]
    fn test_run_completes_and_promotes() {
        let mut controller = instant_controller(3);
        let mut engine = QueueEngine::with_capacity(QueueCapacity::default());
        let mut observer = RecordingObserver::new();

        let report = controller.run(&mut engine, &mut observer).unwrap();

        assert!(report.completed());
        assert_eq!(report.steps_total, 9);
        assert_eq!(report.statistics.steps_executed, 9);
        assert_eq!(report.statistics.engine_successes, 8);
        assert_eq!(report.statistics.engine_failures, 0);
        assert_eq!(report.statistics.promotions, 1);
        assert_eq!(report.final_state.queue_size, 6);
        assert_eq!(report.final_state.waiting_count, 1);
        assert!(report.final_state.is_full);
        assert_eq!(observer.completion_message(), Some(COMPLETION_MESSAGE));
        assert_eq!(controller.state(), SimulationState::Idle);
    }

    #[test]
    fn test_run_state_sequence() {
        let mut controller = instant_controller(5);
        let mut engine = QueueEngine::default();
        let mut observer = RecordingObserver::new();

        controller.run(&mut engine, &mut observer).unwrap();

        assert_eq!(
            observer.states(),
            vec![SimulationState::Running, SimulationState::Completed, SimulationState::Idle]
        );
    }

    #[test]
    fn test_dequeue_step_highlights() {
        let mut controller = instant_controller(11);
        let mut engine = QueueEngine::default();
        let mut observer = RecordingObserver::new();

        controller.run(&mut engine, &mut observer).unwrap();

        let results = observer.results();
        let dequeue = results.last().unwrap();
        assert_eq!(dequeue.kind, StepKind::Dequeue);
        assert!(dequeue.highlights.leaving.is_some());
        let promoted = dequeue.highlights.promoted.unwrap();
        assert_eq!(dequeue.state.seat_holder(1).map(|b| b.booking_id()), Some(promoted));
    }

    #[test]
    fn test_stop_before_run_is_cleared() {
        let mut controller = instant_controller(1);
        controller.stop();

        let report = controller.run(&mut QueueEngine::default(), &mut NoopObserver).unwrap();
        assert!(report.completed());
    }

    #[test]
    fn test_wait_respects_skip() {
        let mut controller = instant_controller(1);
        let mut stats = RunStatistics::new();
        let mut observer = RecordingObserver::new();

        controller.control.skip();
        let started = Instant::now();
        assert!(controller.wait(Duration::from_secs(30), &mut stats, &mut observer));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(stats.skipped_waits, 1);
    }

    #[test]
    fn test_script_error_releases_control() {
        let mut controller = instant_controller(1);
        let names = std::mem::take(&mut controller.sample_names);
        let mut observer = RecordingObserver::new();

        let error = controller.run(&mut QueueEngine::default(), &mut observer).unwrap_err();
        assert_eq!(error.category(), "Script");
        assert_eq!(controller.state(), SimulationState::Idle);
        assert!(observer.states().is_empty());

        controller.sample_names = names;
        let report = controller.run(&mut QueueEngine::default(), &mut observer).unwrap();
        assert!(report.completed());
    }

    #[test]
    fn test_report_written_as_json() {
        let mut controller = instant_controller(2);
        let report = controller.run(&mut QueueEngine::default(), &mut NoopObserver).unwrap();

        let mut buffer = Vec::new();
        report.write_json(&mut buffer).unwrap();

        assert!(buffer.ends_with(b"\n"));
        let parsed: SimulationReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, report);
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["outcome"], "Completed");
        assert_eq!(value["final_state"]["queue_size"], 6);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_report_write_failure_is_io_error() {
        let mut controller = instant_controller(2);
        let report = controller.run(&mut QueueEngine::default(), &mut NoopObserver).unwrap();

        let error = report.write_json(&mut BrokenPipe).unwrap_err();
        assert!(matches!(error, SimulationError::IoError(_)));
        assert_eq!(error.category(), "IO");
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_wait_returns_false_when_stopped() {
        let mut controller = instant_controller(1);
        let mut stats = RunStatistics::new();

        controller.control.stop();
        assert!(!controller.wait(Duration::from_secs(30), &mut stats, &mut RecordingObserver::new()));
    }
}
