//! Error types and handling
//!
//! This module contains error types for controller setup and the CLI. Queue
//! validation failures are not simulation errors: they are `QueueError`
//! values recorded per step and never abort a run.

use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can occur while setting up or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A run was requested while another is still active on the same control handle
    #[error("A simulation is already running")]
    AlreadyRunning,

    /// Script construction failed
    #[error("Script error: {0}")]
    ScriptError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a script error
    pub fn script_error(msg: impl Into<String>) -> Self {
        Self::ScriptError(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::AlreadyRunning => true,
            SimulationError::ScriptError(_) => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::AlreadyRunning => "Controller",
            SimulationError::ScriptError(_) => "Script",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
