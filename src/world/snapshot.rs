//! Serializable world snapshots.
//!
//! A snapshot holds only what placement cannot recompute: which structure
//! stands where, its stock, and where people are. Recipes are re-derived from
//! the profile table on restore.

use serde::{Deserialize, Serialize};

use crate::error::WorldResult;
use crate::world::{Goods, HexCoord, ModelType, Person, Population, Rotation, TileType, World};

/// An occupied tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Cell.
    pub coord: HexCoord,
    /// Structure.
    pub tile_type: TileType,
    /// Structure rotation.
    pub rotation: Rotation,
    /// Stock per good.
    pub supply: Goods,
}

/// A person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSnapshot {
    /// Visual identity.
    pub model_type: ModelType,
    /// Cell the person stands on.
    pub coord: HexCoord,
}

/// Serializable state of a [`World`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Extent along q.
    pub max_q: u16,
    /// Extent along r.
    pub max_r: u16,
    /// Population capacity.
    pub people_max: usize,
    /// Updates applied.
    pub tick: u64,
    /// Simulated seconds.
    pub elapsed_seconds: f64,
    /// Occupied tiles in flat-index order.
    pub tiles: Vec<TileSnapshot>,
    /// People in insertion order.
    pub people: Vec<PersonSnapshot>,
}

impl World {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        let tiles = self
            .grid()
            .occupied()
            .map(|(coord, tile)| TileSnapshot {
                coord,
                tile_type: tile.tile_type,
                rotation: tile.rotation,
                supply: tile.supply,
            })
            .collect();
        let people = self
            .people()
            .iter()
            .map(|p| PersonSnapshot {
                model_type: p.model_type,
                coord: p.coord,
            })
            .collect();

        WorldSnapshot {
            max_q: self.max_q(),
            max_r: self.max_r(),
            people_max: self.population().capacity(),
            tick: self.tick_count(),
            elapsed_seconds: self.elapsed_seconds(),
            tiles,
            people,
        }
    }

    /// Rebuild a world from a snapshot.
    ///
    /// Tiles are placed through [`World::add_tile`], then their stock is
    /// restored and clamped into capacity. People are appended as saved,
    /// without re-checking the tile under them, since a relocated person may
    /// legitimately stand on an empty cell.
    ///
    /// # Errors
    ///
    /// Fails on the first tile outside the snapshot's extents, when the
    /// snapshot lists more people than its capacity, or if storage cannot be
    /// allocated.
    pub fn restore(snapshot: &WorldSnapshot) -> WorldResult<World> {
        let mut world =
            World::with_people_capacity(snapshot.max_q, snapshot.max_r, snapshot.people_max)?;

        for saved in &snapshot.tiles {
            world.add_tile(saved.tile_type, saved.rotation, saved.coord)?;
            if let Some(tile) = world.get_tile_mut(saved.coord) {
                for (good, amount) in saved.supply.iter() {
                    let amount = if amount.is_finite() { amount } else { 0.0 };
                    tile.supply[good] = amount.clamp(0.0, tile.supply_max[good]);
                }
            }
        }

        let population: &mut Population = world.population_mut();
        for saved in &snapshot.people {
            population.push(Person::new(saved.model_type, saved.coord))?;
        }

        world.set_clock(snapshot.tick, snapshot.elapsed_seconds);
        Ok(world)
    }
}
