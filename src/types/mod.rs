//! Core types and identifiers for the booking queue simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential `TKT-<year>-<seq>` booking IDs and their generator
//! - **Enums**: zones, status levels, script step kinds, controller states
//! - **Configuration**: queue capacity and pacing with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use booking_queue_simulator::types::*;
//!
//! let mut ids = BookingIdGenerator::new();
//! assert_eq!(ids.next_id(2025).to_string(), "TKT-2025-001");
//!
//! let config = SimulationConfig { max_seats: 3, ..Default::default() };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.capacity().max_seats, 3);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
