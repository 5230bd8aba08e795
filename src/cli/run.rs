//! Run command implementation.

use super::output::{RunTotals, format_text};
use super::{CliError, OutputFormat, apply_overrides};
use hexsettle::Scenario;
use hexsettle::world::check_invariants;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded, an invariant breaks
/// during the run, or the snapshot cannot be written.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    scenario_path: &Path,
    ticks: Option<u64>,
    dt: Option<f32>,
    format: OutputFormat,
    save: Option<&Path>,
    progress: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let mut scenario = Scenario::load(scenario_path)?;
    apply_overrides(&mut scenario, ticks, dt)?;
    let (mut world, build) = scenario.build_world()?;

    let show_text = format == OutputFormat::Text && !quiet;
    if show_text {
        println!(
            "Running {} for {} ticks (dt = {}s)...",
            scenario.name, scenario.ticks, scenario.dt
        );
        println!();
    }

    let pb = if progress {
        let pb = ProgressBar::new(scenario.ticks);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let mut totals = RunTotals::default();

    for _ in 0..scenario.ticks {
        totals.add(world.update(scenario.dt));

        let violations = check_invariants(&world);
        if let Some(first) = violations.first() {
            if let Some(pb) = &pb {
                pb.abandon();
            }
            return Err(CliError::new(format!(
                "tick {}: {first} ({} violations)",
                world.tick_count(),
                violations.len()
            )));
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    tracing::info!(
        ticks = world.tick_count(),
        elapsed_ms = start.elapsed().as_millis(),
        "run complete"
    );

    let snapshot = world.snapshot();

    if let Some(save_path) = save {
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(save_path, json).map_err(|e| {
            CliError::new(format!("Failed to save snapshot {}: {e}", save_path.display()))
        })?;
        if show_text {
            println!("Snapshot saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&scenario.name, &world, &build, &totals));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    world.destroy();
    Ok(())
}
