//! Enumeration types for the booking queue simulator
//!
//! This module contains all enumeration types used throughout the system,
//! including booking zones, status levels, script step kinds, controller
//! states, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two logical zones of the booking queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Booking holds a seat in `1..=max_seats`
    Confirmed,
    /// Booking is on the waiting list (seat number 0)
    Waiting,
}

impl Zone {
    /// Derive the zone from a raw seat number
    pub fn from_seat(seat_number: u32) -> Self {
        if seat_number > 0 {
            Zone::Confirmed
        } else {
            Zone::Waiting
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Confirmed => write!(f, "confirmed"),
            Zone::Waiting => write!(f, "waiting"),
        }
    }
}

/// Severity attached to an operation report for display collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// Seat confirmed or ticket cancelled
    Success,
    /// Operation rejected by validation
    Error,
    /// Booking placed on the waiting list
    Warning,
    /// Cancellation that promoted a waiting booking
    Info,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLevel::Success => write!(f, "success"),
            StatusLevel::Error => write!(f, "error"),
            StatusLevel::Warning => write!(f, "warning"),
            StatusLevel::Info => write!(f, "info"),
        }
    }
}

/// Kind of operation a simulation script step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Book a specific seat
    Enqueue,
    /// Join the waiting list
    Waiting,
    /// Informational step, no engine call
    Message,
    /// Cancel the front confirmed booking
    Dequeue,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Enqueue => write!(f, "ENQUEUE"),
            StepKind::Waiting => write!(f, "WAITING"),
            StepKind::Message => write!(f, "MESSAGE"),
            StepKind::Dequeue => write!(f, "DEQUEUE"),
        }
    }
}

/// Lifecycle states of the simulation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SimulationState {
    /// No run in progress
    #[default]
    Idle,
    /// Stepping through the script
    Running,
    /// Run frozen until resumed
    Paused,
    /// All steps executed
    Completed,
    /// Run aborted by a stop request
    Stopped,
}

impl SimulationState {
    /// Whether a run is currently in progress (running or paused)
    pub fn is_active(&self) -> bool {
        matches!(self, SimulationState::Running | SimulationState::Paused)
    }

    /// Whether this is one of the two terminal run states
    pub fn is_terminal(&self) -> bool {
        matches!(self, SimulationState::Completed | SimulationState::Stopped)
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationState::Idle => write!(f, "Idle"),
            SimulationState::Running => write!(f, "Running"),
            SimulationState::Paused => write!(f, "Paused"),
            SimulationState::Completed => write!(f, "Completed"),
            SimulationState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Output formats for the final queue snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format for structured data
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
