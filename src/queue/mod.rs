//! Booking queue engine
//!
//! This module contains the queue engine, its error taxonomy, the outcome
//! types returned by successful operations, and read-only state snapshots.
//!
//! # Overview
//!
//! - **QueueEngine**: seat allocation, waiting-list joins, cancellation with FIFO promotion
//! - **QueueError**: non-fatal validation failures with user-facing messages
//! - **Booked / Cancelled**: what an operation changed
//! - **OperationReport**: success flag, message and level for display collaborators
//! - **QueueState**: detached snapshot for observers
//!
//! # Usage Example
//!
//! ```rust
//! use booking_queue_simulator::queue::*;
//! use booking_queue_simulator::types::*;
//!
//! let mut engine = QueueEngine::with_capacity(QueueCapacity { max_seats: 1, max_waiting_list: 2 });
//!
//! engine.enqueue("Alice", 1).unwrap();
//! engine.add_to_waiting_list("Frank").unwrap();
//!
//! let cancelled = engine.cancel_booking(1).unwrap();
//! assert_eq!(cancelled.promoted.unwrap().name(), "Frank");
//!
//! let report = OperationReport::from(&engine.dequeue());
//! assert!(report.success);
//! assert!(engine.queue_state().is_empty);
//! ```

pub mod engine;
pub mod error;
pub mod outcome;
pub mod snapshot;

// Re-export all public types for convenience
pub use engine::*;
pub use error::*;
pub use outcome::*;
pub use snapshot::*;
