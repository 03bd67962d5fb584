//! Booking Queue Simulator
//!
//! A fixed-capacity seat booking queue with a FIFO waiting list, plus a
//! pausable, steppable controller that walks the queue through a scripted
//! demonstration.
//!
//! # Overview
//!
//! Bookings either hold one of `max_seats` seats or wait in a bounded list.
//! Cancelling a seat promotes the earliest waiting booking into it. The
//! simulation controller drives the engine through a shuffled script of
//! bookings and a final dequeue, publishing step text and queue snapshots to
//! an observer while honoring pause, resume, skip and stop requests from any
//! thread.
//!
//! ## Key Features
//!
//! - **Queue Engine**: seat allocation, waiting-list joins, cancellation with FIFO promotion
//! - **Snapshots**: owned, serializable queue state for displays
//! - **Simulation Controller**: interruptible pacing over shared atomic flags
//! - **Observers**: tracing and recording observers out of the box
//! - **Configurable**: CLI flags and JSON config files, seeded scripts
//!
//! ## Quick Start
//!
//! ```rust
//! use booking_queue_simulator::*;
//!
//! let mut engine = QueueEngine::with_capacity(QueueCapacity { max_seats: 2, max_waiting_list: 3 });
//!
//! engine.enqueue("Alice", 1)?;
//! engine.enqueue("Bob", 2)?;
//! engine.add_to_waiting_list("Carol")?;
//!
//! let cancelled = engine.cancel_booking(1)?;
//! assert_eq!(cancelled.promoted.map(|b| b.seat_number()), Some(1));
//! println!("{}", engine.queue_state().summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums and configuration
//! - [`booking`]: the booking entity and the queue store
//! - [`queue`]: the queue engine, errors, outcomes and snapshots
//! - [`simulation`]: controller, control handle, observers, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │◄───┤   Booking   │◄───┤    Queue    │◄───┤ Simulation  │
//! │             │    │             │    │             │    │             │
//! │ Identifiers │    │ Booking     │    │ Engine      │    │ Controller  │
//! │ Enums       │    │ QueueStore  │    │ Snapshot    │    │ Observers   │
//! │ Config      │    │             │    │ Outcomes    │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations)]

// Module declarations
pub mod booking;
pub mod queue;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    BookingId, BookingIdGenerator, ConfigValidationError, OutputFormat, Pacing, QueueCapacity,
    SimulationConfig, SimulationState, StatusLevel, StepKind, Zone,
};

// Bookings and storage
pub use booking::{Booking, QueueStore, WAITING_SEAT};

// Queue engine
pub use queue::{Booked, Cancelled, OperationReport, Outcome, QueueEngine, QueueError, QueueState};

// Simulation types and functionality
pub use simulation::{
    RecordingObserver, RunStatistics, SimulationControl, SimulationController, SimulationError,
    SimulationObserver, SimulationReport, TracingObserver,
};
