//! Queue operation errors
//!
//! Every engine validation failure is reported as a `QueueError`. None of them
//! are fatal: the `Display` text is the message shown to the person making the
//! request, and the queue is left untouched.

use thiserror::Error;

/// Reasons a queue operation can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Name was empty after trimming
    #[error("Please enter a valid name.")]
    EmptyName,

    /// A booking with the same name (case-insensitive) already exists
    #[error("Booking already exists for \"{name}\".")]
    DuplicateName {
        /// Trimmed name that was rejected
        name: String,
    },

    /// Requested seat is held or outside `1..=max_seats`
    #[error("Seat {seat} is already taken. Please choose another seat.")]
    SeatTaken {
        /// Requested seat number
        seat: u32,
    },

    /// No seat was chosen while seats are still available
    #[error("Please select a seat to book.")]
    MustSelectSeat,

    /// The waiting list is at capacity
    #[error("{}", waiting_list_full_message(.all_seats_taken))]
    WaitingListFull {
        /// Whether the request came through the seat-booking path with every seat taken
        all_seats_taken: bool,
    },

    /// No booking holds the requested seat
    #[error("No booking found for seat {seat}.")]
    NotFound {
        /// Requested seat number
        seat: u32,
    },

    /// Dequeue on an empty store
    #[error("No bookings to cancel. Queue is empty.")]
    QueueEmpty,
}

impl QueueError {
    /// Short, stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::EmptyName => "EmptyName",
            QueueError::DuplicateName { .. } => "DuplicateName",
            QueueError::SeatTaken { .. } => "SeatTaken",
            QueueError::MustSelectSeat => "MustSelectSeat",
            QueueError::WaitingListFull { .. } => "WaitingListFull",
            QueueError::NotFound { .. } => "NotFound",
            QueueError::QueueEmpty => "QueueEmpty",
        }
    }
}

fn waiting_list_full_message(all_seats_taken: &bool) -> &'static str {
    if *all_seats_taken {
        "Sorry, both confirmed seats and waiting list are full."
    } else {
        "Sorry, the waiting list is full."
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
