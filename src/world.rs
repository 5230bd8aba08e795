//! Simulation layer for hexsettle.
//!
//! Implements the settlement rules:
//! - Hex grid of tiles addressed by axial coordinates
//! - Resource profiles assigned when a structure is placed
//! - Per-tick production and consumption on every occupied tile
//! - A capacity-bounded registry of people anchored to tiles

mod coord;
mod economy;
mod goods;
mod grid;
mod invariants;
mod population;
mod profile;
mod snapshot;
mod state;
mod tile;

pub use coord::{HexCoord, HexLayout};
pub use economy::{ProductionReport, TickOutcome, tick};
pub use goods::{GOOD_COUNT, Good, Goods};
pub use grid::Grid;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use population::{PEOPLE_MAX, PERSON_OFFSET, Person, PersonId, Population};
pub use profile::{PROFILES, ResourceProfile, profile_for};
pub use snapshot::{PersonSnapshot, TileSnapshot, WorldSnapshot};
pub use state::{INVALID_TILE_INFO, World};
pub use tile::{ModelType, Rotation, Tile, TileType};
