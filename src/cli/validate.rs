//! Scenario validation command implementation.

use super::CliError;
use hexsettle::Scenario;
use hexsettle::world::check_invariants;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be read, parsed, or validated.
pub(crate) fn execute(scenario_path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", scenario_path.display());
    println!();

    let scenario = Scenario::load(scenario_path)?;
    print_check("Scenario parses", true);

    let (world, report) = scenario.build_world()?;
    print_check("All structures placed", report.tiles_rejected == 0);
    print_check("All people placed", report.people_rejected == 0);
    print_check("Initial invariants hold", check_invariants(&world).is_empty());

    println!();
    println!("Summary:");
    println!("  Name:       {}", scenario.name);
    println!("  Grid:       {}x{}", scenario.max_q, scenario.max_r);
    println!("  Structures: {} placed, {} rejected", report.tiles_placed, report.tiles_rejected);
    println!("  People:     {} added, {} rejected", report.people_added, report.people_rejected);
    println!("  Run:        {} ticks of {}s", scenario.ticks, scenario.dt);

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "WARN" };
    println!("  [{status}] {name}");
}
