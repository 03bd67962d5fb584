//! Successful operation outcomes and display reports
//!
//! `Booked` and `Cancelled` carry the bookings an operation touched.
//! `OperationReport` flattens any result into the `success` / `message` /
//! `level` triple that display collaborators surface to the user.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::queue::QueueResult;
use crate::types::{StatusLevel, Zone};

/// Common behaviour of successful queue outcomes
pub trait Outcome {
    /// Human-readable description of what happened
    fn message(&self) -> String;

    /// Severity shown alongside the message
    fn level(&self) -> StatusLevel;
}

/// A booking created by `enqueue` or `add_to_waiting_list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booked {
    /// The booking as stored
    pub booking: Booking,
    /// Zone the booking landed in
    pub zone: Zone,
}

impl Outcome for Booked {
    fn message(&self) -> String {
        match self.zone {
            Zone::Confirmed => format!(
                "Seat {} confirmed for {}!",
                self.booking.seat_number(),
                self.booking.name()
            ),
            Zone::Waiting => format!("{} added to waiting list.", self.booking.name()),
        }
    }

    fn level(&self) -> StatusLevel {
        match self.zone {
            Zone::Confirmed => StatusLevel::Success,
            Zone::Waiting => StatusLevel::Warning,
        }
    }
}

/// A booking removed by `cancel_booking` or `dequeue`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancelled {
    /// The removed booking, with the seat it held at removal time
    pub cancelled: Booking,
    /// Waiting booking promoted into the freed seat, if any
    pub promoted: Option<Booking>,
    /// Set when `dequeue` fell back to dropping the front waiting entry
    pub left_waiting_list: bool,
}

impl Cancelled {
    /// Seat freed by the cancellation (0 when a waiting entry was removed)
    pub fn freed_seat(&self) -> u32 {
        self.cancelled.seat_number()
    }
}

impl Outcome for Cancelled {
    fn message(&self) -> String {
        if self.left_waiting_list {
            return format!("Removed {} from waiting list.", self.cancelled.name());
        }

        let seat = self.freed_seat();
        let mut message = format!("Ticket cancelled for {} (Seat {}).", self.cancelled.name(), seat);
        if let Some(promoted) = &self.promoted {
            message.push_str(&format!(
                " {} has been auto-confirmed to Seat {}!",
                promoted.name(),
                seat
            ));
        }
        message
    }

    fn level(&self) -> StatusLevel {
        if self.promoted.is_some() {
            StatusLevel::Info
        } else {
            StatusLevel::Success
        }
    }
}

/// Flattened result of a queue operation for display collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReport {
    /// Whether the operation succeeded
    pub success: bool,
    /// Message to surface verbatim
    pub message: String,
    /// Display severity
    pub level: StatusLevel,
}

impl OperationReport {
    /// Build a report from any queue result
    pub fn from_result<T: Outcome>(result: &QueueResult<T>) -> Self {
        match result {
            Ok(outcome) => Self { success: true, message: outcome.message(), level: outcome.level() },
            Err(error) => Self { success: false, message: error.to_string(), level: StatusLevel::Error },
        }
    }
}

impl<T: Outcome> From<&QueueResult<T>> for OperationReport {
    fn from(result: &QueueResult<T>) -> Self {
        Self::from_result(result)
    }
}
