//! Configuration structures for the booking queue simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control queue capacity and the pacing of scripted simulation runs.

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default values shared by the CLI, config file merge, and `Default` impls
pub mod defaults {
    /// Number of confirmed seats in the venue
    pub const MAX_SEATS: u32 = 5;

    /// Capacity of the waiting list
    pub const MAX_WAITING_LIST: usize = 10;

    /// Delay before each script step executes (milliseconds)
    pub const STEP_DELAY_MS: u64 = 1200;

    /// Delay after each script step executes (milliseconds)
    pub const SETTLE_DELAY_MS: u64 = 800;

    /// Hold on the completion message before returning to idle (milliseconds)
    pub const COMPLETION_DELAY_MS: u64 = 1500;

    /// Granularity at which waits re-check pause/stop flags (milliseconds)
    pub const POLL_INTERVAL_MS: u64 = 100;

    /// Sample names used to build the demonstration script
    pub const SAMPLE_NAMES: [&str; 7] =
        ["Alice", "Bob", "Charlie", "Diana", "Edward", "Fiona", "George"];
}

/// Fixed capacities of the two queue zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCapacity {
    /// Capacity of the confirmed zone (seats are numbered `1..=max_seats`)
    pub max_seats: u32,
    /// Capacity of the waiting zone
    pub max_waiting_list: usize,
}

impl Default for QueueCapacity {
    fn default() -> Self {
        Self { max_seats: defaults::MAX_SEATS, max_waiting_list: defaults::MAX_WAITING_LIST }
    }
}

/// Pacing intervals used by the simulation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Wait before executing a step
    pub step_delay: Duration,
    /// Wait after executing a step
    pub settle_delay: Duration,
    /// Hold on the completion message
    pub completion_delay: Duration,
    /// Flag polling granularity during waits
    pub poll_interval: Duration,
}

impl Pacing {
    /// Pacing with every delay set to zero; useful for instant replays
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(defaults::STEP_DELAY_MS),
            settle_delay: Duration::from_millis(defaults::SETTLE_DELAY_MS),
            completion_delay: Duration::from_millis(defaults::COMPLETION_DELAY_MS),
            poll_interval: Duration::from_millis(defaults::POLL_INTERVAL_MS),
        }
    }
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "booking-queue-simulator",
    version = "0.1.0",
    about = "Booking Queue Simulator - Replays seat bookings, waiting-list joins and cancellations",
    long_about = "Runs a scripted demonstration of a fixed-capacity seat booking queue: seats are confirmed in order, extra guests join a FIFO waiting list, and a cancellation promotes the earliest waiting guest.

EXAMPLES:
    # Run with default settings
    booking-queue-simulator

    # Use a configuration file
    booking-queue-simulator --config config.json

    # Reproducible, fast run with a JSON snapshot at the end
    booking-queue-simulator --seed 7 --step-delay-ms 0 --settle-delay-ms 0 --output-format json

    # Control the run from stdin (pause, resume, skip, stop)
    booking-queue-simulator --interactive

    # Generate configuration template
    booking-queue-simulator --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of confirmed seats
    #[arg(
        long,
        help = "Number of confirmed seats",
        long_help = "Capacity of the confirmed zone. Seats are numbered 1..=max-seats. Must be greater than 0. Default: 5"
    )]
    pub max_seats: Option<u32>,

    /// Capacity of the waiting list
    #[arg(long, help = "Waiting list capacity (default: 10)")]
    pub max_waiting_list: Option<usize>,

    /// Random seed for reproducible scripts
    #[arg(long, help = "Random seed for reproducible scripts")]
    pub seed: Option<u64>,

    /// Delay before each step executes
    #[arg(long, help = "Delay before each step executes, in milliseconds")]
    pub step_delay_ms: Option<u64>,

    /// Delay after each step executes
    #[arg(long, help = "Delay after each step executes, in milliseconds")]
    pub settle_delay_ms: Option<u64>,

    /// Hold on the completion message
    #[arg(long, help = "Hold on the completion message, in milliseconds")]
    pub completion_delay_ms: Option<u64>,

    /// Flag polling interval during waits
    #[arg(long, help = "Pause/stop polling interval, in milliseconds")]
    pub poll_interval_ms: Option<u64>,

    /// Output format for the final queue snapshot
    #[arg(
        long,
        help = "Output format (text or json)",
        long_help = "Output format for the final queue snapshot. Supported formats: text, json. Default: text"
    )]
    pub output_format: Option<String>,

    /// Directory for rolling log files
    #[arg(long, help = "Also write JSON logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Read control commands from stdin
    #[arg(
        short,
        long,
        help = "Read pause/resume/skip/stop commands from stdin",
        long_help = "Read control commands from stdin while the simulation runs. One command per line: pause (p), resume (r), skip (s), stop (q)."
    )]
    pub interactive: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of confirmed seats
    pub max_seats: Option<u32>,

    /// Capacity of the waiting list
    pub max_waiting_list: Option<usize>,

    /// Random seed for reproducible scripts
    pub seed: Option<u64>,

    /// Delay before each step executes (milliseconds)
    pub step_delay_ms: Option<u64>,

    /// Delay after each step executes (milliseconds)
    pub settle_delay_ms: Option<u64>,

    /// Hold on the completion message (milliseconds)
    pub completion_delay_ms: Option<u64>,

    /// Flag polling interval (milliseconds)
    pub poll_interval_ms: Option<u64>,

    /// Output format for the final snapshot
    pub output_format: Option<String>,

    /// Names used to build the demonstration script
    pub sample_names: Option<Vec<String>>,
}

/// Configuration for the booking queue and its simulation runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Number of confirmed seats
    pub max_seats: u32,

    /// Capacity of the waiting list
    pub max_waiting_list: usize,

    /// Random seed for reproducible scripts
    pub seed: Option<u64>,

    /// Delay before each step executes (milliseconds)
    pub step_delay_ms: u64,

    /// Delay after each step executes (milliseconds)
    pub settle_delay_ms: u64,

    /// Hold on the completion message (milliseconds)
    pub completion_delay_ms: u64,

    /// Flag polling interval (milliseconds)
    pub poll_interval_ms: u64,

    /// Output format for the final snapshot
    pub output_format: String,

    /// Names used to build the demonstration script
    pub sample_names: Vec<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Seat count is invalid
    #[error("Seat count must be greater than 0, got {0}")]
    InvalidSeatCount(u32),

    /// Poll interval is invalid
    #[error("Poll interval must be greater than 0 ms, got {0}")]
    InvalidPollInterval(u64),

    /// Output format is not recognised
    #[error("{0}")]
    InvalidOutputFormat(String),

    /// Sample name list is empty or contains a blank entry
    #[error("Sample names must be non-empty and must not contain blank entries")]
    InvalidSampleNames,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_seats: defaults::MAX_SEATS,
            max_waiting_list: defaults::MAX_WAITING_LIST,
            seed: None,
            step_delay_ms: defaults::STEP_DELAY_MS,
            settle_delay_ms: defaults::SETTLE_DELAY_MS,
            completion_delay_ms: defaults::COMPLETION_DELAY_MS,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            output_format: "text".to_string(),
            sample_names: defaults::SAMPLE_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            max_seats: config_file.max_seats.unwrap_or(defaults.max_seats),
            max_waiting_list: config_file.max_waiting_list.unwrap_or(defaults.max_waiting_list),
            seed: config_file.seed.or(defaults.seed),
            step_delay_ms: config_file.step_delay_ms.unwrap_or(defaults.step_delay_ms),
            settle_delay_ms: config_file.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
            completion_delay_ms: config_file
                .completion_delay_ms
                .unwrap_or(defaults.completion_delay_ms),
            poll_interval_ms: config_file.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            sample_names: config_file.sample_names.unwrap_or(defaults.sample_names),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.max_seats {
            config.max_seats = value;
        }
        if let Some(value) = args.max_waiting_list {
            config.max_waiting_list = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.step_delay_ms {
            config.step_delay_ms = value;
        }
        if let Some(value) = args.settle_delay_ms {
            config.settle_delay_ms = value;
        }
        if let Some(value) = args.completion_delay_ms {
            config.completion_delay_ms = value;
        }
        if let Some(value) = args.poll_interval_ms {
            config.poll_interval_ms = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_seats == 0 {
            return Err(ConfigValidationError::InvalidSeatCount(self.max_seats));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval(self.poll_interval_ms));
        }

        self.get_output_format().map_err(ConfigValidationError::InvalidOutputFormat)?;

        if self.sample_names.is_empty() || self.sample_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigValidationError::InvalidSampleNames);
        }

        Ok(())
    }

    /// Queue capacities described by this configuration
    pub fn capacity(&self) -> QueueCapacity {
        QueueCapacity { max_seats: self.max_seats, max_waiting_list: self.max_waiting_list }
    }

    /// Pacing intervals described by this configuration
    pub fn pacing(&self) -> Pacing {
        Pacing {
            step_delay: Duration::from_millis(self.step_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            completion_delay: Duration::from_millis(self.completion_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs::try_parse_from(["test"]).unwrap()
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.max_seats, 5);
        assert_eq!(config.max_waiting_list, 10);
        assert!(config.seed.is_none());
        assert_eq!(config.step_delay_ms, 1200);
        assert_eq!(config.settle_delay_ms, 800);
        assert_eq!(config.completion_delay_ms, 1500);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.output_format, "text");
        assert_eq!(config.sample_names.len(), 7);
        assert_eq!(config.sample_names[0], "Alice");
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "max_seats": 8,
            "max_waiting_list": 3,
            "seed": 12345,
            "step_delay_ms": 10,
            "output_format": "json"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.max_seats, 8);
        assert_eq!(config.max_waiting_list, 3);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.step_delay_ms, 10);
        assert_eq!(config.output_format, "json");
        // Fields missing from the file keep their defaults
        assert_eq!(config.settle_delay_ms, 800);
        assert_eq!(config.sample_names.len(), 7);
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = SimulationConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_config_file_not_found() {
        let result = SimulationConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = empty_args();
        args.max_seats = Some(3);
        args.seed = Some(54321);
        args.step_delay_ms = Some(0);

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.max_seats, 3);
        assert_eq!(config.seed, Some(54321));
        assert_eq!(config.step_delay_ms, 0);
        // Default values should remain for non-overridden fields
        assert_eq!(config.max_waiting_list, 10);
        assert_eq!(config.settle_delay_ms, 800);
    }

    #[test]
    fn test_simulation_config_validation_success() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulation_config_validation_seat_count() {
        let config = SimulationConfig { max_seats: 0, ..Default::default() };

        match config.validate() {
            Err(ConfigValidationError::InvalidSeatCount(0)) => {}
            other => panic!("Expected InvalidSeatCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_simulation_config_validation_poll_interval() {
        let config = SimulationConfig { poll_interval_ms: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidPollInterval(0))));
    }

    #[test]
    fn test_simulation_config_validation_output_format() {
        let config = SimulationConfig { output_format: "csv".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOutputFormat(_))));
    }

    #[test]
    fn test_simulation_config_validation_sample_names() {
        let config = SimulationConfig { sample_names: vec![], ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidSampleNames)));

        let config = SimulationConfig {
            sample_names: vec!["Alice".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidSampleNames)));
    }

    #[test]
    fn test_capacity_and_pacing() {
        let config = SimulationConfig {
            max_seats: 4,
            max_waiting_list: 2,
            step_delay_ms: 5,
            ..Default::default()
        };

        assert_eq!(config.capacity(), QueueCapacity { max_seats: 4, max_waiting_list: 2 });
        let pacing = config.pacing();
        assert_eq!(pacing.step_delay, Duration::from_millis(5));
        assert_eq!(pacing.poll_interval, Duration::from_millis(100));
        assert_eq!(Pacing::default().settle_delay, Duration::from_millis(800));
    }

    #[test]
    fn test_simulation_config_serialization() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
