//! Simulation orchestration and control
//!
//! This module contains the simulation controller, its shared control handle,
//! script construction, observers, run statistics, error handling and logging
//! setup.
//!
//! # Overview
//!
//! - **SimulationController**: runs a scripted demonstration against a `QueueEngine`
//! - **SimulationControl**: cloneable pause/resume/skip/stop handle
//! - **ScriptBuilder**: shuffles sample names into enqueue, waiting, message and dequeue steps
//! - **SimulationObserver**: receives step text, snapshots, highlights and state changes
//! - **RunStatistics**: per-run counters
//! - **SimulationError**: setup and controller errors
//!
//! # Usage Example
//!
//! ```rust
//! use booking_queue_simulator::queue::QueueEngine;
//! use booking_queue_simulator::simulation::*;
//! use booking_queue_simulator::types::*;
//!
//! let config = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut controller = SimulationController::new(&config)
//!     .unwrap()
//!     .with_pacing(Pacing::instant());
//! let mut engine = QueueEngine::with_capacity(config.capacity());
//! let mut observer = RecordingObserver::new();
//!
//! let report = controller.run(&mut engine, &mut observer).unwrap();
//! assert_eq!(report.outcome, SimulationState::Completed);
//! assert_eq!(report.statistics.promotions, 1);
//! ```

pub mod control;
pub mod controller;
pub mod error;
pub mod logging;
pub mod observer;
pub mod script;
pub mod statistics;

// Re-export all public types for convenience
pub use control::*;
pub use controller::*;
pub use error::*;
pub use logging::*;
pub use observer::*;
pub use script::*;
pub use statistics::*;
