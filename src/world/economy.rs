//! Tile economy: per-tick production and consumption.
//!
//! Each occupied tile is an isolated workshop. Once per tick it checks
//! whether its own stock can cover `demand * dt` of every good; if so it
//! works, adding `(production - demand) * dt` to each stock and clamping to
//! capacity. If any single good falls short, the tile does nothing at all
//! that tick.
//!
//! There is no exchange between tiles.

use crate::world::{Good, Grid, Tile};

/// What a tile did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Empty tile; skipped.
    Idle,
    /// Some input was short, so nothing was produced or consumed.
    Stalled,
    /// Inputs were consumed and outputs produced.
    Worked,
}

/// Summary of one `update` across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductionReport {
    /// Tiles that worked.
    pub worked: usize,
    /// Occupied tiles that could not cover their demand.
    pub stalled: usize,
}

impl ProductionReport {
    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Stalled => self.stalled += 1,
            TickOutcome::Worked => self.worked += 1,
        }
    }
}

/// Whether `tile` holds enough stock to work for `dt` seconds.
///
/// A good the tile does not consume never blocks it, whatever `dt` is. A NaN
/// `dt` blocks every tile.
#[must_use]
#[inline]
fn can_work(tile: &Tile, dt: f32) -> bool {
    !dt.is_nan()
        && Good::ALL
            .iter()
            .all(|&g| tile.demand[g] == 0.0 || tile.supply[g] >= tile.demand[g] * dt)
}

/// Apply one tick of production and consumption to a single tile.
///
/// `dt` is trusted; a negative, huge or infinite value only meets the clamp
/// to `0..=supply_max`. Goods whose production and demand cancel out are
/// left untouched.
pub fn tick(tile: &mut Tile, dt: f32) -> TickOutcome {
    if tile.is_empty() {
        return TickOutcome::Idle;
    }

    if !can_work(tile, dt) {
        return TickOutcome::Stalled;
    }

    for g in Good::ALL {
        let rate = tile.production[g] - tile.demand[g];
        if rate != 0.0 {
            tile.supply[g] = (tile.supply[g] + rate * dt).clamp(0.0, tile.supply_max[g]);
        }
    }

    TickOutcome::Worked
}

/// Tick every tile in flat-index order.
pub(crate) fn update_production(grid: &mut Grid, dt: f32) -> ProductionReport {
    let mut report = ProductionReport::default();
    for tile in grid.tiles_mut() {
        report.record(tick(tile, dt));
    }
    report
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;
    use crate::world::{Goods, TileType};

    /// Prove a worked tile always ends inside its capacity.
    #[kani::proof]
    fn prove_tick_stays_within_capacity() {
        let supply_max: f32 = kani::any();
        let supply: f32 = kani::any();
        let production: f32 = kani::any();
        let demand: f32 = kani::any();
        let dt: f32 = kani::any();
        kani::assume(supply_max.is_finite() && supply_max >= 0.0 && supply_max <= 1e6);
        kani::assume(supply.is_finite() && supply >= 0.0 && supply <= supply_max);
        kani::assume(production.is_finite() && production >= 0.0 && production <= 1e3);
        kani::assume(demand.is_finite() && demand >= 0.0 && demand <= 1e3);
        kani::assume(dt.is_finite() && dt >= 0.0 && dt <= 1e3);

        let mut tile = Tile::EMPTY;
        tile.tile_type = TileType::Farm;
        tile.production = Goods::ZERO.with(Good::Wheat, production);
        tile.demand = Goods::ZERO.with(Good::Wheat, demand);
        tile.supply = Goods::ZERO.with(Good::Wheat, supply);
        tile.supply_max = Goods::ZERO.with(Good::Wheat, supply_max);

        tick(&mut tile, dt);

        assert!(tile.supply[Good::Wheat] >= 0.0);
        assert!(tile.supply[Good::Wheat] <= supply_max);
    }
}
