//! World invariants - sanity checks that detect bugs.
//!
//! The economy clamps every stock into `0..=supply_max`, placement never
//! leaves resource vectors on empty tiles, and the registry refuses to grow
//! past its capacity. These checks should never fire; if they do, something
//! wrote to the world behind the simulation's back.

use std::fmt;

use crate::world::{Good, World};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns every violation found, or an empty list if all hold.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (coord, tile) in world.grid().iter() {
        if tile.is_empty() {
            let untouched = tile.production.is_zero()
                && tile.demand.is_zero()
                && tile.supply.is_zero()
                && tile.supply_max.is_zero();
            if !untouched {
                violations.push(InvariantViolation {
                    message: format!("Empty tile at {coord} carries resource state"),
                });
            }
            continue;
        }

        for good in Good::ALL {
            let supply = tile.supply[good];
            let max = tile.supply_max[good];
            if !supply.is_finite() {
                violations.push(InvariantViolation {
                    message: format!("Tile at {coord} has non-finite {} supply", good.name()),
                });
            } else if supply < 0.0 {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile at {coord} has negative {} supply {supply}",
                        good.name()
                    ),
                });
            } else if supply > max {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile at {coord} has {} supply {supply} above capacity {max}",
                        good.name()
                    ),
                });
            }
        }
    }

    let population = world.population();
    if population.len() > population.capacity() {
        violations.push(InvariantViolation {
            message: format!(
                "Population {} exceeds capacity {}",
                population.len(),
                population.capacity()
            ),
        });
    }

    violations
}

/// Assert all world invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(world: &World) {
    let violations = check_invariants(world);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("World invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_world: &World) {}
