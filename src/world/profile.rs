//! Resource profiles: the production recipe of each structure type.
//!
//! A profile is copied onto a tile the moment it is placed. Types without a
//! row in [`PROFILES`] get [`ResourceProfile::ZERO`], the same profile empty
//! tiles carry.

use crate::world::{Good, Goods, TileType};

/// Standard stock capacity of a producing structure.
const STORE_CAPACITY: f32 = 100.0;

/// Production, demand and capacity vectors for one structure type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceProfile {
    /// Units per second produced while working.
    pub production: Goods,
    /// Units per second consumed while working.
    pub demand: Goods,
    /// Stock capacity per good.
    pub supply_max: Goods,
}

impl ResourceProfile {
    /// Produces nothing, consumes nothing, stores nothing.
    pub const ZERO: ResourceProfile = ResourceProfile {
        production: Goods::ZERO,
        demand: Goods::ZERO,
        supply_max: Goods::ZERO,
    };

    /// A structure that produces `rate` of one good per second and stores up
    /// to [`STORE_CAPACITY`] of it.
    const fn producer(good: Good, rate: f32) -> Self {
        Self {
            production: Goods::ZERO.with(good, rate),
            demand: Goods::ZERO,
            supply_max: Goods::ZERO.with(good, STORE_CAPACITY),
        }
    }
}

/// Recipes keyed by structure type.
pub const PROFILES: &[(TileType, ResourceProfile)] = &[
    (TileType::Empty, ResourceProfile::ZERO),
    (TileType::Farm, ResourceProfile::producer(Good::Wheat, 1.0)),
    (TileType::Forest, ResourceProfile::producer(Good::Wood, 1.0)),
    // Will raise population capacity once housing limits exist.
    (TileType::House, ResourceProfile::ZERO),
    (TileType::Grass, ResourceProfile::ZERO),
];

/// Look up the recipe for `tile_type`.
///
/// Types missing from [`PROFILES`] silently resolve to
/// [`ResourceProfile::ZERO`].
#[must_use]
pub fn profile_for(tile_type: TileType) -> ResourceProfile {
    PROFILES
        .iter()
        .find(|(t, _)| *t == tile_type)
        .map_or(ResourceProfile::ZERO, |(_, profile)| *profile)
}
