//! Booking entity and queue store
//!
//! This module contains the `Booking` record and the `QueueStore` that holds
//! bookings in insertion order.
//!
//! # Usage Example
//!
//! ```rust
//! use booking_queue_simulator::booking::*;
//! use booking_queue_simulator::types::*;
//! use chrono::NaiveTime;
//!
//! let mut store = QueueStore::new();
//! let id = store.issue_id(2025);
//! let booking = Booking::new("Alice", id, 3, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
//!
//! assert_eq!(booking.booking_id().to_string(), "TKT-2025-001");
//! assert_eq!(booking.zone(), Zone::Confirmed);
//! assert_eq!(booking.timestamp(), "10:30:00");
//! ```

#[allow(clippy::module_inception)]
pub mod booking;
pub mod store;

// Re-export all public types for convenience
pub use booking::{Booking, WAITING_SEAT};
pub use store::QueueStore;
