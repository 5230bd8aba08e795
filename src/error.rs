//! Error types for the simulation core.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failures reported by world construction, placement and lookup.
///
/// None of these are fatal: the operation that produced one has left the
/// world exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Coordinate outside the grid extents.
    #[error("invalid hex coordinates {q}/{r}")]
    OutOfBounds {
        /// Axial q of the rejected coordinate.
        q: i32,
        /// Axial r of the rejected coordinate.
        r: i32,
    },
    /// A person was placed on a tile with no structure.
    #[error("cannot place a person on empty tile {q}/{r}")]
    EmptyTile {
        /// Axial q of the empty tile.
        q: i32,
        /// Axial r of the empty tile.
        r: i32,
    },
    /// The population registry has no free slot.
    #[error("exceeded maximum number of people ({capacity})")]
    PopulationFull {
        /// Registry capacity.
        capacity: usize,
    },
    /// Tile or person storage could not be allocated.
    #[error("failed to allocate world storage: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
