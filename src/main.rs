// Booking Queue Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/booking-queue-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/booking-queue-simulator --max-seats 3 --seed 7 --interactive --verbose
// ```

use anyhow::{Context, Result};
use booking_queue_simulator::queue::{QueueEngine, QueueState};
use booking_queue_simulator::simulation::{
    LoggingConfig, SimulationControl, SimulationController, SimulationObserver, SimulationReport,
    StepNotice, StepResult, TracingObserver,
};
use booking_queue_simulator::types::config::CliArgs;
use booking_queue_simulator::types::{OutputFormat, SimulationConfig, SimulationState, StatusLevel};
use clap::Parser;
use std::io::{self, BufRead};
use std::process;
use std::thread;
use tracing::{error, info, warn};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Keep the guard alive so file logs flush before exit
    let _logging_guard =
        match LoggingConfig::from_cli_flags(args.verbose, args.debug, args.log_dir.clone()).init() {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {}", e);
                process::exit(1);
            }
        };

    info!("Starting Booking Queue Simulator");

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Booking Queue Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let config = SimulationConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let output_format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Invalid output format")?;

    let mut controller =
        SimulationController::new(&config).context("Failed to create simulation controller")?;
    let mut engine = QueueEngine::with_capacity(config.capacity());

    if args.interactive {
        spawn_command_reader(controller.control());
        eprintln!("Commands: pause (p), resume (r), skip (s), stop (q)");
        eprintln!();
    }

    let mut observer = ConsoleObserver::default();
    let report = controller.run(&mut engine, &mut observer).context("Simulation run failed")?;

    print_report(&report, output_format)?;
    Ok(())
}

/// Forward stdin commands to the control handle until stdin closes
fn spawn_command_reader(control: SimulationControl) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Stopped reading commands: {}", e);
                    break;
                }
            };
            match line.trim().to_lowercase().as_str() {
                "p" | "pause" => control.pause(),
                "r" | "resume" => control.resume(),
                "s" | "skip" => control.skip(),
                "q" | "stop" | "quit" => {
                    control.stop();
                    break;
                }
                "" => {}
                other => eprintln!("Unknown command '{}' (pause, resume, skip, stop)", other),
            }
        }
    });
}

/// Prints step text and operation results to stderr, and logs them
#[derive(Debug, Default)]
struct ConsoleObserver {
    log: TracingObserver,
}

impl SimulationObserver for ConsoleObserver {
    fn on_state_change(&mut self, from: SimulationState, to: SimulationState) {
        self.log.on_state_change(from, to);
        match to {
            SimulationState::Paused => eprintln!("⏸  Paused"),
            SimulationState::Stopped => eprintln!("⏹  Simulation stopped."),
            _ => {}
        }
    }

    fn on_step(&mut self, notice: &StepNotice) {
        self.log.on_step(notice);
        eprintln!("[Step {}/{}]", notice.index, notice.total);
        eprintln!("{}", notice.message);
    }

    fn on_step_executed(&mut self, result: &StepResult) {
        self.log.on_step_executed(result);
        if let Some(report) = &result.report {
            let marker = match report.level {
                StatusLevel::Success => "✔",
                StatusLevel::Info => "ℹ",
                StatusLevel::Warning => "⚠",
                StatusLevel::Error => "✘",
            };
            eprintln!("  {} {}", marker, report.message);
        }
        eprintln!("  Queue: {}", result.state.summary());
        eprintln!();
    }

    fn on_complete(&mut self, message: &str, state: &QueueState) {
        self.log.on_complete(message, state);
        eprintln!("{}", message);
        eprintln!();
    }
}

fn print_report(report: &SimulationReport, output_format: OutputFormat) -> Result<()> {
    match output_format {
        OutputFormat::Json => report
            .write_json(&mut io::stdout().lock())
            .context("Failed to write simulation report")?,
        OutputFormat::Text => println!("{}", report.final_state.render_text()),
    }

    eprintln!("Outcome: {} ({} steps in script)", report.outcome, report.steps_total);
    eprintln!("{}", report.statistics.summary());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Booking Queue Simulator");
    eprintln!("=======================");
    eprintln!("Seat bookings with a FIFO waiting list and auto-confirmation");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Seats: {}", config.max_seats);
    eprintln!("  Waiting List Capacity: {}", config.max_waiting_list);
    eprintln!(
        "  Pacing: {} ms before / {} ms after each step, {} ms completion hold",
        config.step_delay_ms, config.settle_delay_ms, config.completion_delay_ms
    );
    eprintln!("  Poll Interval: {} ms", config.poll_interval_ms);
    eprintln!("  Sample Names: {}", config.sample_names.join(", "));
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
