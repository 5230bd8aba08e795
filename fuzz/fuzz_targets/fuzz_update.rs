#![no_main]

use arbitrary::Arbitrary;
use hexsettle::world::check_invariants;
use hexsettle::{HexCoord, ModelType, Rotation, TileType, World};
use libfuzzer_sys::fuzz_target;

/// One host call against the world.
#[derive(Arbitrary, Debug)]
enum Action {
    /// Place a structure by raw type id.
    AddTile { kind: i8, rotation: i32, q: i16, r: i16 },
    /// Add a person.
    AddPerson { q: i16, r: i16 },
    /// Move the first person found on a cell.
    Teleport { from_q: i16, from_r: i16, to_q: i16, to_r: i16 },
    /// Advance the simulation.
    Update { dt: f32 },
}

#[derive(Arbitrary, Debug)]
struct UpdateInput {
    /// Grid extents (kept small to avoid OOM).
    max_q: u8,
    max_r: u8,
    people_max: u8,
    actions: Vec<Action>,
}

fuzz_target!(|input: UpdateInput| {
    let mut world = match World::with_people_capacity(
        u16::from(input.max_q),
        u16::from(input.max_r),
        usize::from(input.people_max),
    ) {
        Ok(w) => w,
        Err(_) => return,
    };

    for action in input.actions.into_iter().take(256) {
        match action {
            Action::AddTile { kind, rotation, q, r } => {
                let Some(kind) = TileType::from_raw(i32::from(kind)) else {
                    continue;
                };
                let coord = HexCoord::new(i32::from(q), i32::from(r));
                let in_bounds = world.grid().in_bounds(coord);
                let result = world.add_tile(kind, Rotation::new(rotation), coord);
                assert_eq!(result.is_ok(), in_bounds, "placement at {coord}");
            }
            Action::AddPerson { q, r } => {
                let before = world.people().len();
                let coord = HexCoord::new(i32::from(q), i32::from(r));
                let added = world.add_person(ModelType::Agent, coord).is_ok();
                assert_eq!(world.people().len(), before + usize::from(added));
            }
            Action::Teleport { from_q, from_r, to_q, to_r } => {
                let from = HexCoord::new(i32::from(from_q), i32::from(from_r));
                if let Some(person) = world.get_person_mut(from) {
                    person.teleport(HexCoord::new(i32::from(to_q), i32::from(to_r)));
                }
            }
            Action::Update { dt } => {
                // Non-finite time steps are outside the host contract.
                if !dt.is_finite() {
                    continue;
                }
                world.update(dt);
                let violations = check_invariants(&world);
                assert!(
                    violations.is_empty(),
                    "Invariants violated after update({dt}): {:?}",
                    violations
                );
            }
        }
    }

    assert!(world.people().len() <= usize::from(input.people_max));
});
