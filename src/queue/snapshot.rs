//! Read-only queue snapshots
//!
//! `QueueState` is an owned copy of everything an observer needs to render the
//! queue. It never borrows from the live store, so holding one across later
//! engine calls is always safe.
//!
//! Two orderings are exposed. `queue` is raw insertion order, which after an
//! in-place promotion may interleave confirmed and waiting entries. `confirmed`
//! (by seat) and `waiting` (FIFO) are the zone-sorted views; renderers that
//! want a "first N are confirmed" strip should build it from those.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// Snapshot of engine-derived state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueState {
    /// Full store copy in insertion order
    pub queue: Vec<Booking>,
    /// Confirmed bookings ordered by seat number
    pub confirmed: Vec<Booking>,
    /// Waiting bookings in arrival order
    pub waiting: Vec<Booking>,
    /// Free seats, ascending
    pub available_seats: Vec<u32>,
    /// Number of free seats
    pub available_seat_count: usize,
    /// Number of waiting bookings
    pub waiting_count: usize,
    /// Total number of bookings
    pub queue_size: usize,
    /// No seats left
    pub is_full: bool,
    /// No bookings at all
    pub is_empty: bool,
    /// Waiting list at capacity
    pub waiting_list_full: bool,
    /// Configured seat capacity
    pub max_seats: u32,
    /// Configured waiting-list capacity
    pub max_waiting_list: usize,
}

impl QueueState {
    /// Booking holding the given seat
    pub fn seat_holder(&self, seat_number: u32) -> Option<&Booking> {
        self.confirmed.iter().find(|b| b.seat_number() == seat_number)
    }

    /// One-line summary used by log output
    pub fn summary(&self) -> String {
        format!(
            "{}/{} seats taken, {}/{} waiting",
            self.max_seats as usize - self.available_seat_count,
            self.max_seats,
            self.waiting_count,
            self.max_waiting_list
        )
    }

    /// Multi-line seat map and waiting list
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Seats ({}):\n", self.summary()));
        for seat in 1..=self.max_seats {
            match self.seat_holder(seat) {
                Some(b) => out.push_str(&format!(
                    "  [{:>2}] {:<12} {} @ {}\n",
                    seat,
                    b.name(),
                    b.booking_id(),
                    b.timestamp()
                )),
                None => out.push_str(&format!("  [{:>2}] (available)\n", seat)),
            }
        }
        out.push_str("Waiting list:\n");
        if self.waiting.is_empty() {
            out.push_str("  (empty)\n");
        }
        for (position, b) in self.waiting.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {:<12} {} @ {}\n",
                position + 1,
                b.name(),
                b.booking_id(),
                b.timestamp()
            ));
        }
        out
    }
}
