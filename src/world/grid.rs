//! Grid storage: a flat, bounds-checked array of tiles.

use crate::error::WorldResult;
use crate::world::{HexCoord, Tile};

/// The tile grid.
///
/// Tiles live in one flat vector indexed by `q * max_r + r`, so iteration
/// order is q-major, then r.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Extent along q.
    max_q: u16,
    /// Extent along r.
    max_r: u16,
    /// Tiles in flat-index order.
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocate a grid of `max_q * max_r` empty tiles.
    ///
    /// Zero extents are allowed and yield a grid with no addressable cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Allocation`](crate::WorldError::Allocation) if
    /// the tile storage cannot be reserved.
    pub fn new(max_q: u16, max_r: u16) -> WorldResult<Self> {
        let len = usize::from(max_q) * usize::from(max_r);
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(len)?;
        tiles.resize(len, Tile::EMPTY);

        Ok(Self {
            max_q,
            max_r,
            tiles,
        })
    }

    /// Extent along q.
    #[must_use]
    pub const fn max_q(&self) -> u16 {
        self.max_q
    }

    /// Extent along r.
    #[must_use]
    pub const fn max_r(&self) -> u16 {
        self.max_r
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in flat-index order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable tiles in flat-index order.
    #[must_use]
    #[inline]
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Check if a coordinate lies inside the extents.
    #[must_use]
    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        self.index_of(coord).is_some()
    }

    /// Flat index of `coord`, or `None` if it is out of range.
    ///
    /// Unlike [`Grid::get`], this does not report anything.
    #[must_use]
    #[inline]
    pub fn index_of(&self, coord: HexCoord) -> Option<usize> {
        let q = usize::try_from(coord.q).ok()?;
        let r = usize::try_from(coord.r).ok()?;
        let max_r = usize::from(self.max_r);
        if q < usize::from(self.max_q) && r < max_r {
            Some(q * max_r + r)
        } else {
            None
        }
    }

    /// Coordinate of a flat index. The index is not bounds-checked.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn coord_at(&self, index: usize) -> HexCoord {
        let max_r = usize::from(self.max_r).max(1);
        HexCoord::new((index / max_r) as i32, (index % max_r) as i32)
    }

    /// Tile at `coord`.
    ///
    /// Out-of-range coordinates are reported as an addressing error and
    /// yield `None`.
    #[must_use]
    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        match self.index_of(coord) {
            Some(idx) => Some(&self.tiles[idx]),
            None => {
                tracing::error!(q = coord.q, r = coord.r, "invalid tile access {coord}");
                None
            }
        }
    }

    /// Mutable tile at `coord`, reporting out-of-range access like
    /// [`Grid::get`].
    #[must_use]
    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        match self.index_of(coord) {
            Some(idx) => Some(&mut self.tiles[idx]),
            None => {
                tracing::error!(q = coord.q, r = coord.r, "invalid tile access {coord}");
                None
            }
        }
    }

    /// Iterate over coordinates and tiles in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (self.coord_at(idx), tile))
    }

    /// Iterate over occupied tiles in flat-index order.
    pub fn occupied(&self) -> impl Iterator<Item = (HexCoord, &Tile)> {
        self.iter().filter(|(_, tile)| !tile.is_empty())
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Prove that every accepted coordinate maps inside the tile vector and
    /// back to itself.
    #[kani::proof]
    fn prove_index_in_bounds() {
        let max_q: u16 = kani::any();
        let max_r: u16 = kani::any();
        kani::assume(max_q <= 8 && max_r <= 8);
        let grid = Grid {
            max_q,
            max_r,
            tiles: Vec::new(),
        };
        let coord = HexCoord::new(kani::any(), kani::any());

        if let Some(idx) = grid.index_of(coord) {
            assert!(idx < usize::from(max_q) * usize::from(max_r));
            assert_eq!(grid.coord_at(idx), coord);
        }
    }
}
