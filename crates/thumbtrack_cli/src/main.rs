//! thumbtrack - headless scroll bar physics runner
//!
//! Runs scroll bar scenarios on a synthetic frame clock and prints the
//! resulting event trace, so motion tuning can be checked without a UI.

mod scenario;
mod simulate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use thumbtrack_bar::ScrollBarConfig;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;
use crate::simulate::{Sample, Trace};

/// Headless runner for thumbtrack scroll bars
#[derive(Parser, Debug)]
#[command(name = "thumbtrack")]
#[command(about = "Simulate scroll bar drags, flicks and bounces")]
#[command(version)]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and print the emitted events
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// Scroll bar configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Display pulses per second
        #[arg(long, default_value = "60")]
        fps: u32,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Release the thumb with a velocity and print every frame until it rests
    Trajectory {
        /// Release velocity in points per second
        #[arg(long, allow_negative_numbers = true)]
        velocity: f64,

        /// Content offset at release
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: f64,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "60")]
        fps: u32,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            fps,
            format,
        } => cmd_simulate(&scenario, config.as_deref(), fps, format),
        Commands::Config { config } => cmd_config(config.as_deref()),
        Commands::Trajectory {
            velocity,
            offset,
            config,
            fps,
            format,
        } => cmd_trajectory(velocity, offset, config.as_deref(), fps, format),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScrollBarConfig> {
    match path {
        Some(path) => ScrollBarConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ScrollBarConfig::default()),
    }
}

fn cmd_simulate(path: &Path, config: Option<&Path>, fps: u32, format: OutputFormat) -> Result<()> {
    let config = load_config(config)?;
    let scenario = Scenario::from_path(path)?;
    tracing::info!(steps = scenario.steps.len(), fps, "running {}", path.display());

    let trace = simulate::run_scenario(config, &scenario, fps)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trace)?),
        OutputFormat::Text => print_trace(&trace),
    }
    Ok(())
}

fn cmd_config(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn cmd_trajectory(
    velocity: f64,
    offset: f64,
    config: Option<&Path>,
    fps: u32,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config)?;
    let samples = simulate::trajectory(config, offset, velocity, fps)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
        OutputFormat::Text => print_samples(&samples),
    }
    Ok(())
}

fn print_trace(trace: &Trace) {
    for entry in &trace.events {
        println!("{:>9.1} ms  {:?}", entry.time_ms, entry.event);
    }
    println!();
    println!(
        "{} frames, content {:.2}, indicator {:.2}, {:?}",
        trace.frames, trace.final_content_offset, trace.final_indicator_offset, trace.final_phase
    );
}

fn print_samples(samples: &[Sample]) {
    println!("{:>9}  {:>10}  {:>10}  phase", "ms", "content", "indicator");
    for sample in samples {
        println!(
            "{:>9.1}  {:>10.2}  {:>10.2}  {:?}",
            sample.time_ms, sample.content_offset, sample.indicator_offset, sample.phase
        );
    }
}
