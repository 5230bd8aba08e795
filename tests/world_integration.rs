//! Integration tests for world construction, placement and updates.
//!
//! These exercise the public API end to end, the way a frame-driven host
//! or the CLI would.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use std::io::Write;

use hexsettle::world::{INVALID_TILE_INFO, PEOPLE_MAX, check_invariants};
use hexsettle::{
    Good, HexCoord, ModelType, Rotation, Scenario, TileType, World, WorldError, WorldSnapshot,
};

fn farm_world() -> World {
    let mut world = World::new(7, 7).unwrap();
    world
        .add_tile(TileType::Farm, Rotation::new(0), HexCoord::new(2, 3))
        .unwrap();
    world
}

// ==================== SCENARIOS ====================

#[test]
fn test_farm_placement_takes_profile() {
    let world = farm_world();
    let tile = world.get_tile(HexCoord::new(2, 3)).unwrap();

    assert_eq!(tile.tile_type, TileType::Farm);
    assert_eq!(tile.production[Good::Wheat], 1.0);
    assert_eq!(tile.supply_max[Good::Wheat], 100.0);
    assert_eq!(tile.supply[Good::Wheat], 0.0);
}

#[test]
fn test_farm_fills_to_capacity_and_stays_there() {
    let mut world = farm_world();
    for _ in 0..10 {
        world.update(10.0);
    }
    let wheat = |w: &World| w.get_tile(HexCoord::new(2, 3)).unwrap().supply[Good::Wheat];
    assert_eq!(wheat(&world), 100.0);

    for _ in 0..5 {
        world.update(10.0);
        assert_eq!(wheat(&world), 100.0);
    }
    assert!(check_invariants(&world).is_empty());
}

#[test]
fn test_people_only_stand_on_structures() {
    let mut world = farm_world();

    world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();
    let person = world.get_person(HexCoord::new(2, 3)).unwrap();
    assert_eq!(person.coord, HexCoord::new(2, 3));

    assert_eq!(
        world.add_person(ModelType::Agent, HexCoord::new(0, 0)),
        Err(WorldError::EmptyTile { q: 0, r: 0 })
    );
    assert!(world.get_person(HexCoord::new(0, 0)).is_none());
}

// ==================== WHOLE-WORLD BEHAVIOUR ====================

#[test]
fn test_only_placed_tiles_change() {
    let mut world = farm_world();
    world
        .add_tile(TileType::Forest, Rotation::new(1), HexCoord::new(6, 6))
        .unwrap();
    let before: Vec<_> = world.grid().tiles().to_vec();

    world.update(3.0);

    for (i, (old, new)) in before.iter().zip(world.grid().tiles()).enumerate() {
        let coord = world.grid().coord_at(i);
        if coord == HexCoord::new(2, 3) || coord == HexCoord::new(6, 6) {
            assert_ne!(old, new, "producer at {coord} should have changed");
        } else {
            assert_eq!(old, new, "tile at {coord} should be untouched");
        }
    }
}

#[test]
fn test_every_out_of_range_access_is_rejected() {
    let mut world = farm_world();
    let outside = [
        HexCoord::new(-1, 0),
        HexCoord::new(0, -1),
        HexCoord::new(7, 0),
        HexCoord::new(0, 7),
        HexCoord::new(i32::MAX, i32::MIN),
    ];

    for coord in outside {
        assert!(world.get_tile(coord).is_none());
        assert!(world.get_person(coord).is_none());
        assert_eq!(world.tile_info(coord), INVALID_TILE_INFO);
        assert!(matches!(
            world.add_tile(TileType::House, Rotation::new(0), coord),
            Err(WorldError::OutOfBounds { .. })
        ));
        assert!(matches!(
            world.add_person(ModelType::Agent, coord),
            Err(WorldError::OutOfBounds { .. })
        ));
    }
    assert_eq!(world.grid().occupied().count(), 1);
    assert!(world.people().is_empty());
}

#[test]
fn test_registry_rejects_past_capacity() {
    let mut world = farm_world();
    for _ in 0..PEOPLE_MAX {
        world.add_person(ModelType::Agent, HexCoord::new(2, 3)).unwrap();
    }
    assert_eq!(
        world.add_person(ModelType::Agent, HexCoord::new(2, 3)),
        Err(WorldError::PopulationFull {
            capacity: PEOPLE_MAX
        })
    );
    assert_eq!(world.people().len(), PEOPLE_MAX);
}

#[test]
fn test_registry_rejects_past_capacity_on_distinct_tiles() {
    let mut world = World::new(11, 11).unwrap();
    let cells: Vec<HexCoord> = (0..11)
        .flat_map(|q| (0..11).map(move |r| HexCoord::new(q, r)))
        .take(PEOPLE_MAX + 5)
        .collect();
    for &coord in &cells {
        world.add_tile(TileType::Grass, Rotation::new(0), coord).unwrap();
    }

    let mut rejected = Vec::new();
    for &coord in &cells {
        if let Err(err) = world.add_person(ModelType::Agent, coord) {
            assert_eq!(err, WorldError::PopulationFull { capacity: PEOPLE_MAX });
            rejected.push(coord);
        }
    }

    assert_eq!(rejected, cells[PEOPLE_MAX..].to_vec());
    assert_eq!(world.people().len(), PEOPLE_MAX);
    for coord in &cells[..PEOPLE_MAX] {
        assert!(world.get_person(*coord).is_some());
    }
    for coord in &rejected {
        assert!(world.get_person(*coord).is_none());
    }
}

#[test]
fn test_tile_info_tracks_stock() {
    let mut world = World::new(4, 4).unwrap();
    world
        .add_tile(TileType::Forest, Rotation::new(0), HexCoord::new(3, 1))
        .unwrap();
    world.update(0.5);
    assert_eq!(
        world.tile_info(HexCoord::new(3, 1)),
        "Tile: 3/1\n0.500000,0.000000,"
    );
}

// ==================== SCENARIO FILES ====================

const VILLAGE: &str = r#"
name = "village"
max_q = 8
max_r = 6
dt = 2.0
ticks = 10

[[tiles]]
kind = "farm"
q = 1
r = 1

[[tiles]]
kind = "forest"
q = 5
r = 2
rotation = 3

[[tiles]]
kind = "house"
q = 3
r = 4

[[people]]
q = 3
r = 4
model = "agent"
"#;

#[test]
fn test_scenario_file_builds_and_runs() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VILLAGE.as_bytes()).unwrap();

    let scenario = Scenario::load(file.path()).unwrap();
    let (mut world, report) = scenario.build_world().unwrap();
    assert!(report.is_clean());
    assert_eq!(world.people().len(), 1);

    for _ in 0..scenario.ticks {
        world.update(scenario.dt);
        assert!(check_invariants(&world).is_empty());
    }

    let farm = world.get_tile(HexCoord::new(1, 1)).unwrap();
    assert_eq!(farm.supply[Good::Wheat], 20.0);
    let house = world.get_tile(HexCoord::new(3, 4)).unwrap();
    assert!(house.supply.is_zero());
}

#[test]
fn test_snapshot_survives_json_round_trip() {
    let (mut world, _) = Scenario::parse(VILLAGE).unwrap().build_world().unwrap();
    for _ in 0..4 {
        world.update(1.25);
    }

    let json = serde_json::to_string(&world.snapshot()).unwrap();
    let snapshot: WorldSnapshot = serde_json::from_str(&json).unwrap();
    let restored = World::restore(&snapshot).unwrap();

    assert_eq!(restored.tick_count(), 4);
    assert_eq!(
        restored.get_tile(HexCoord::new(5, 2)).unwrap().supply[Good::Wood],
        5.0
    );
    assert_eq!(
        restored.get_tile(HexCoord::new(5, 2)).unwrap().rotation.step(),
        3
    );
    assert_eq!(restored.people(), world.people());
}
