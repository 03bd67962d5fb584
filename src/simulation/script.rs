//! Demonstration script construction
//!
//! A script fills every seat in order, sends the remaining sample names to the
//! waiting list, announces the cancellation, then dequeues the front booking so
//! the earliest waiting guest is promoted.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::StepKind;

/// One scripted operation and its explanatory text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    /// Operation to perform
    pub kind: StepKind,
    /// Guest name for `Enqueue` and `Waiting` steps
    pub name: Option<String>,
    /// Seat for `Enqueue` steps
    pub seat_number: Option<u32>,
    /// Text published before the step executes
    pub message: String,
}

impl SimulationStep {
    /// Book `seat_number` for `name`
    pub fn enqueue(name: impl Into<String>, seat_number: u32) -> Self {
        let name = name.into();
        Self {
            kind: StepKind::Enqueue,
            message: format!(
                "📥 ENQUEUE: Adding \"{}\" to REAR of queue...\n→ Seat {} (Confirmed Zone)",
                name, seat_number
            ),
            name: Some(name),
            seat_number: Some(seat_number),
        }
    }

    /// Put `name` on the waiting list
    pub fn waiting(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: StepKind::Waiting,
            message: format!(
                "📥 ENQUEUE: Adding \"{}\" to REAR of queue...\n→ Waiting List (All seats full)",
                name
            ),
            name: Some(name),
            seat_number: None,
        }
    }

    /// Informational step with no queue operation
    pub fn message(text: impl Into<String>) -> Self {
        Self { kind: StepKind::Message, name: None, seat_number: None, message: text.into() }
    }

    /// Cancel the front confirmed booking
    pub fn dequeue() -> Self {
        Self {
            kind: StepKind::Dequeue,
            name: None,
            seat_number: None,
            message: "📤 DEQUEUE: Removing FRONT element...\n→ First waiting user auto-confirmed!"
                .to_string(),
        }
    }

    /// First line of the step text
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Builds demonstration scripts from a pool of sample names
#[derive(Debug, Clone)]
pub struct ScriptBuilder {
    sample_names: Vec<String>,
    max_seats: u32,
}

impl ScriptBuilder {
    /// Create a builder for a venue with `max_seats` seats
    pub fn new(sample_names: Vec<String>, max_seats: u32) -> Self {
        Self { sample_names, max_seats }
    }

    /// Shuffle the names and lay out the script
    ///
    /// Step count depends only on the number of names and seats, never on the
    /// shuffle: one enqueue per seat (while names last), one waiting step per
    /// leftover name, then a message and a dequeue.
    pub fn build<R: Rng>(&self, rng: &mut R) -> SimulationResult<Vec<SimulationStep>> {
        if self.sample_names.is_empty() {
            return Err(SimulationError::script_error("no sample names to build a script from"));
        }
        if let Some(blank) = self.sample_names.iter().position(|name| name.trim().is_empty()) {
            return Err(SimulationError::script_error(format!(
                "sample name at position {} is blank",
                blank
            )));
        }

        let mut names = self.sample_names.clone();
        names.shuffle(rng);

        let confirmed = names.len().min(self.max_seats as usize);
        let mut steps = Vec::with_capacity(names.len() + 2);

        for (index, name) in names.iter().take(confirmed).enumerate() {
            steps.push(SimulationStep::enqueue(name.clone(), index as u32 + 1));
        }
        for name in names.iter().skip(confirmed) {
            steps.push(SimulationStep::waiting(name.clone()));
        }

        steps.push(SimulationStep::message(
            "⏳ Now let's DEQUEUE from FRONT...\nThis will trigger auto-confirmation!",
        ));
        steps.push(SimulationStep::dequeue());

        Ok(steps)
    }
}
