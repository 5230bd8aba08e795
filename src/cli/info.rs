//! Tile inspection command implementation.

use super::{CliError, apply_overrides};
use hexsettle::{HexCoord, Scenario};
use std::path::Path;

/// Execute the info command.
///
/// Runs the scenario for `ticks` updates (zero by default) and prints the
/// diagnostic text of one tile, plus whoever stands on it.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or the world cannot be
/// built.
pub(crate) fn execute(
    scenario_path: &Path,
    q: i32,
    r: i32,
    ticks: Option<u64>,
) -> Result<(), CliError> {
    let mut scenario = Scenario::load(scenario_path)?;
    apply_overrides(&mut scenario, Some(ticks.unwrap_or(0)), None)?;
    let (mut world, _) = scenario.build_world()?;

    for _ in 0..scenario.ticks {
        world.update(scenario.dt);
    }

    let coord = HexCoord::new(q, r);
    println!("{}", world.tile_info(coord));

    if let Some(tile) = world.get_tile(coord) {
        println!("Structure: {} (rotation {})", tile.tile_type.name(), tile.rotation.step());
        match world.get_person(coord) {
            Some(person) => println!("Person: {:?}", person.model_type),
            None => println!("Person: none"),
        }
    }

    Ok(())
}
