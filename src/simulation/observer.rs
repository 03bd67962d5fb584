//! Simulation observers
//!
//! The controller publishes everything a display needs through the
//! `SimulationObserver` trait: step text before each step, the snapshot and
//! highlighted bookings after it, state changes, and the completion message.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::queue::{OperationReport, QueueState};
use crate::types::{BookingId, SimulationState, StepKind};

/// Announcement published before a step waits and executes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNotice {
    /// 1-based step position
    pub index: usize,
    /// Number of steps in the script
    pub total: usize,
    /// Operation the step performs
    pub kind: StepKind,
    /// Explanatory text
    pub message: String,
}

/// Bookings a display should draw attention to after a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    /// Booking created by the step
    pub added: Option<BookingId>,
    /// Booking removed by the step
    pub leaving: Option<BookingId>,
    /// Waiting booking promoted into the freed seat
    pub promoted: Option<BookingId>,
}

impl Highlights {
    /// Whether nothing is highlighted
    pub fn is_empty(&self) -> bool {
        self.added.is_none() && self.leaving.is_none() && self.promoted.is_none()
    }
}

/// What happened when a step executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based step position
    pub index: usize,
    /// Operation the step performed
    pub kind: StepKind,
    /// Engine outcome; `None` for message steps
    pub report: Option<OperationReport>,
    /// Bookings touched by the step
    pub highlights: Highlights,
    /// Queue snapshot taken after the step
    pub state: QueueState,
}

/// Receives controller notifications; every method defaults to a no-op
pub trait SimulationObserver {
    /// Lifecycle state changed
    fn on_state_change(&mut self, _from: SimulationState, _to: SimulationState) {}

    /// A step is about to wait and execute
    fn on_step(&mut self, _notice: &StepNotice) {}

    /// A step finished executing
    fn on_step_executed(&mut self, _result: &StepResult) {}

    /// The script ran to the end
    fn on_complete(&mut self, _message: &str, _state: &QueueState) {}
}

/// Ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Writes every notification as a structured log line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn on_state_change(&mut self, from: SimulationState, to: SimulationState) {
        info!(%from, %to, "Simulation state changed");
    }

    fn on_step(&mut self, notice: &StepNotice) {
        info!(
            step = notice.index,
            total = notice.total,
            kind = %notice.kind,
            "{}",
            notice.message.replace('\n', " ")
        );
    }

    fn on_step_executed(&mut self, result: &StepResult) {
        match &result.report {
            Some(report) => info!(
                step = result.index,
                success = report.success,
                level = %report.level,
                queue = %result.state.summary(),
                "{}",
                report.message
            ),
            None => info!(step = result.index, queue = %result.state.summary(), "Message step"),
        }
    }

    fn on_complete(&mut self, message: &str, state: &QueueState) {
        info!(queue = %state.summary(), "{}", message.replace('\n', " "));
    }
}

/// Event captured by `RecordingObserver`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    /// State transition
    StateChanged {
        /// Previous state
        from: SimulationState,
        /// New state
        to: SimulationState,
    },
    /// Step announcement
    Step(StepNotice),
    /// Step execution
    Executed(StepResult),
    /// Completion message with the final snapshot
    Completed {
        /// Completion text
        message: String,
        /// Queue snapshot at completion
        state: QueueState,
    },
}

/// Collects every notification in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    /// Events in the order they were published
    pub events: Vec<ObservedEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every state entered, in order
    pub fn states(&self) -> Vec<SimulationState> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::StateChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    /// Every step announcement
    pub fn notices(&self) -> Vec<&StepNotice> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Step(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// Every executed step
    pub fn results(&self) -> Vec<&StepResult> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Executed(result) => Some(result),
                _ => None,
            })
            .collect()
    }

    /// Completion message, if the run completed
    pub fn completion_message(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            ObservedEvent::Completed { message, .. } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl SimulationObserver for RecordingObserver {
    fn on_state_change(&mut self, from: SimulationState, to: SimulationState) {
        self.events.push(ObservedEvent::StateChanged { from, to });
    }

    fn on_step(&mut self, notice: &StepNotice) {
        self.events.push(ObservedEvent::Step(notice.clone()));
    }

    fn on_step_executed(&mut self, result: &StepResult) {
        self.events.push(ObservedEvent::Executed(result.clone()));
    }

    fn on_complete(&mut self, message: &str, state: &QueueState) {
        self.events.push(ObservedEvent::Completed { message: message.to_string(), state: state.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::QueueEngine;

    #[test]
    fn test_recording_observer_filters() {
        let state = QueueEngine::default().queue_state();
        let mut observer = RecordingObserver::new();

        observer.on_state_change(SimulationState::Idle, SimulationState::Running);
        observer.on_step(&StepNotice {
            index: 1,
            total: 2,
            kind: StepKind::Message,
            message: "hello".to_string(),
        });
        observer.on_step_executed(&StepResult {
            index: 1,
            kind: StepKind::Message,
            report: None,
            highlights: Highlights::default(),
            state: state.clone(),
        });
        observer.on_complete("done", &state);

        assert_eq!(observer.states(), vec![SimulationState::Running]);
        assert_eq!(observer.notices().len(), 1);
        assert_eq!(observer.results().len(), 1);
        assert_eq!(observer.completion_message(), Some("done"));
        assert_eq!(observer.events.len(), 4);
    }

    #[test]
    fn test_highlights_is_empty() {
        assert!(Highlights::default().is_empty());
        let highlights = Highlights { added: Some(BookingId::new(2025, 1)), ..Default::default() };
        assert!(!highlights.is_empty());
    }
}
