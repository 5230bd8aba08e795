//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use hexsettle::world::{GOOD_COUNT, Good, Goods};
use hexsettle::{BuildReport, ProductionReport, World};

/// Totals accumulated over a run.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RunTotals {
    /// Ticks in which a tile produced.
    pub(super) worked: u64,
    /// Ticks in which a tile was blocked by missing inputs.
    pub(super) stalled: u64,
}

impl RunTotals {
    /// Fold one tick's report into the totals.
    pub(super) fn add(&mut self, report: ProductionReport) {
        self.worked += report.worked as u64;
        self.stalled += report.stalled as u64;
    }
}

/// Sum stock across every tile.
fn total_stock(world: &World) -> Goods {
    let mut total = Goods::ZERO;
    for (_, tile) in world.grid().occupied() {
        for (good, amount) in tile.supply.iter() {
            total[good] += amount;
        }
    }
    total
}

/// Format the end-of-run summary as human-readable text.
pub(super) fn format_text(
    name: &str,
    world: &World,
    build: &BuildReport,
    totals: &RunTotals,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Scenario: {name}");
    let _ = writeln!(
        output,
        "  Grid: {}x{} ({} structures, {} people)",
        world.max_q(),
        world.max_r(),
        world.grid().occupied().count(),
        world.people().len()
    );
    if !build.is_clean() {
        let _ = writeln!(
            output,
            "  Rejected: {} tiles, {} people",
            build.tiles_rejected, build.people_rejected
        );
    }
    let _ = writeln!(
        output,
        "  Ticks: {} ({:.2}s simulated)",
        world.tick_count(),
        world.elapsed_seconds()
    );
    let _ = writeln!(
        output,
        "  Tile-ticks: {} worked, {} stalled\n",
        totals.worked, totals.stalled
    );

    let stock = total_stock(world);
    let _ = writeln!(output, "  Stock ({GOOD_COUNT} goods):");
    for good in Good::ALL {
        let _ = writeln!(output, "    {:<6} {:>10.3}", good.name(), stock[good]);
    }

    output
}
