//! CLI command implementations for hexsettle.

pub(crate) mod info;
pub(crate) mod run;
pub(crate) mod validate;

mod output;

use std::error::Error;
use std::fmt;

use clap::ValueEnum;
use hexsettle::{Scenario, ScenarioError, WorldError};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Final world snapshot as JSON.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<WorldError> for CliError {
    fn from(e: WorldError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Apply command-line overrides to a loaded scenario.
///
/// # Errors
///
/// Returns an error if the overridden `dt` is negative or not finite.
pub(crate) fn apply_overrides(
    scenario: &mut Scenario,
    ticks: Option<u64>,
    dt: Option<f32>,
) -> Result<(), CliError> {
    if let Some(ticks) = ticks {
        scenario.ticks = ticks;
    }
    if let Some(dt) = dt {
        scenario.dt = dt;
    }
    scenario.validate()?;
    Ok(())
}
