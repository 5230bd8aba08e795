//! Hexsettle CLI - run and inspect settlement scenarios.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Hexsettle - a hex-grid settlement simulation
#[derive(Parser, Debug)]
#[command(name = "hexsettle")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario and print the final state
    Run {
        /// Scenario file (.toml)
        #[arg(required = true)]
        scenario: PathBuf,

        /// Number of ticks (default: from scenario)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Seconds per tick (default: from scenario)
        #[arg(long)]
        dt: Option<f32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the final snapshot as JSON
        #[arg(long)]
        save: Option<PathBuf>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Suppress the run banner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the diagnostic text of one tile
    Info {
        /// Scenario file (.toml)
        #[arg(required = true)]
        scenario: PathBuf,

        /// Axial q of the tile
        #[arg(long, allow_negative_numbers = true)]
        q: i32,

        /// Axial r of the tile
        #[arg(long, allow_negative_numbers = true)]
        r: i32,

        /// Ticks to run before inspecting (default: 0)
        #[arg(short, long)]
        ticks: Option<u64>,
    },

    /// Check a scenario file without running it
    Validate {
        /// Scenario file (.toml)
        #[arg(required = true)]
        scenario: PathBuf,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexsettle=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.command {
        Commands::Run {
            scenario,
            ticks,
            dt,
            format,
            save,
            progress,
            quiet,
        } => cli::run::execute(&scenario, ticks, dt, format, save.as_deref(), progress, quiet),

        Commands::Info {
            scenario,
            q,
            r,
            ticks,
        } => cli::info::execute(&scenario, q, r, ticks),

        Commands::Validate { scenario } => cli::validate::execute(&scenario),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
