// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Hexsettle: a hex-grid settlement simulation core.
//!
//! The world is a fixed axial grid of tiles. Each placed structure produces
//! and consumes goods every update, holding the result as bounded stock;
//! people stand on occupied tiles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI driver / scenarios          │
//! ├─────────────────────────────────────┤
//! │   World (placement, queries, tick)  │
//! ├──────────────────┬──────────────────┤
//! │  Grid + economy  │   Population     │
//! └──────────────────┴──────────────────┘
//! ```

pub mod error;
pub mod scenario;
pub mod world;

pub use error::{WorldError, WorldResult};
pub use scenario::{BuildReport, Scenario, ScenarioError};

// Re-export key world types at crate root for convenience
pub use world::{
    Good, Goods, HexCoord, HexLayout, ModelType, Person, PersonId, ProductionReport, Rotation,
    Tile, TileType, World, WorldSnapshot,
};
