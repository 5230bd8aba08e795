//! Tile, structure and visual identity types.

use serde::{Deserialize, Serialize};

use crate::world::Goods;

/// Structure occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Unoccupied cell. Never ticked.
    #[default]
    Empty,
    /// Grows wheat.
    Farm,
    /// Yields wood.
    Forest,
    /// Housing; no production.
    House,
    /// Ground cover that exists to host people.
    Grass,
    /// Trading post; has no resource recipe yet.
    Market,
}

impl TileType {
    /// Every structure type, `Empty` first.
    pub const ALL: [TileType; 6] = [
        TileType::Empty,
        TileType::Farm,
        TileType::Forest,
        TileType::House,
        TileType::Grass,
        TileType::Market,
    ];

    /// Map a raw id from an input collaborator to a type.
    ///
    /// `-1` is `Empty`; `0..=4` follow declaration order after it. Any other
    /// id returns `None`.
    #[must_use]
    pub const fn from_raw(id: i32) -> Option<Self> {
        match id {
            -1 => Some(TileType::Empty),
            0 => Some(TileType::Farm),
            1 => Some(TileType::Forest),
            2 => Some(TileType::House),
            3 => Some(TileType::Grass),
            4 => Some(TileType::Market),
            _ => None,
        }
    }

    /// Raw id, the inverse of [`TileType::from_raw`].
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            TileType::Empty => -1,
            TileType::Farm => 0,
            TileType::Forest => 1,
            TileType::House => 2,
            TileType::Grass => 3,
            TileType::Market => 4,
        }
    }

    /// Whether this is the unoccupied type.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, TileType::Empty)
    }

    /// Visual identity assigned when this type is placed.
    #[must_use]
    pub const fn model(self) -> ModelType {
        match self {
            TileType::Empty => ModelType::None,
            TileType::Farm => ModelType::Farm,
            TileType::Forest => ModelType::Forest,
            TileType::House => ModelType::House,
            TileType::Grass => ModelType::Grass,
            TileType::Market => ModelType::Market,
        }
    }

    /// Lower-case name, as used in scenario files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Farm => "farm",
            TileType::Forest => "forest",
            TileType::House => "house",
            TileType::Grass => "grass",
            TileType::Market => "market",
        }
    }
}

/// Opaque visual identity, resolved to a renderable by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Nothing to draw.
    #[default]
    None,
    /// Farm building.
    Farm,
    /// Forest patch.
    Forest,
    /// House building.
    House,
    /// Grass ground cover.
    Grass,
    /// Market building.
    Market,
    /// A person.
    Agent,
}

/// Rotation of a structure in sixths of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Rotation(u8);

impl Rotation {
    /// Number of distinct rotation steps.
    pub const STEPS: u8 = 6;

    /// Wrap any integer step into `0..6`.
    #[must_use]
    #[allow(
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub const fn new(step: i32) -> Self {
        Self(step.rem_euclid(Self::STEPS as i32) as u8)
    }

    /// The step in `0..6`.
    #[must_use]
    pub const fn step(self) -> u8 {
        self.0
    }
}

impl From<i32> for Rotation {
    fn from(step: i32) -> Self {
        Self::new(step)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        i32::from(rotation.0)
    }
}

/// One grid cell's structure and resource state.
///
/// `supply` stays within `0..=supply_max` for every good.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tile {
    /// Structure on this cell.
    pub tile_type: TileType,
    /// Visual identity set on placement.
    pub model_type: ModelType,
    /// Structure rotation.
    pub rotation: Rotation,
    /// Units per second generated while the tile is working.
    pub production: Goods,
    /// Units per second consumed to keep working.
    pub demand: Goods,
    /// Current stock.
    pub supply: Goods,
    /// Stock capacity.
    pub supply_max: Goods,
}

impl Tile {
    /// An unoccupied tile with all-zero resource vectors.
    pub const EMPTY: Tile = Tile {
        tile_type: TileType::Empty,
        model_type: ModelType::None,
        rotation: Rotation(0),
        production: Goods::ZERO,
        demand: Goods::ZERO,
        supply: Goods::ZERO,
        supply_max: Goods::ZERO,
    };

    /// Whether no structure occupies this tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tile_type.is_empty()
    }

    /// Intended to wipe a tile when its structure is removed.
    ///
    /// Removal is not part of the simulation yet, so this leaves the tile
    /// untouched.
    pub fn clear(&mut self) {
        tracing::debug!(tile_type = self.tile_type.name(), "tile clear requested; no-op");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ids_round_trip() {
        for tile_type in TileType::ALL {
            assert_eq!(TileType::from_raw(tile_type.raw()), Some(tile_type));
        }
        assert_eq!(TileType::from_raw(5), None);
        assert_eq!(TileType::from_raw(-2), None);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::new(0).step(), 0);
        assert_eq!(Rotation::new(5).step(), 5);
        assert_eq!(Rotation::new(6).step(), 0);
        assert_eq!(Rotation::new(13).step(), 1);
        assert_eq!(Rotation::new(-1).step(), 5);
    }

    #[test]
    fn test_empty_tile() {
        let tile = Tile::EMPTY;
        assert!(tile.is_empty());
        assert!(tile.supply.is_zero());
        assert_eq!(tile, Tile::default());
    }

    #[test]
    fn test_clear_leaves_tile_untouched() {
        let mut tile = Tile::EMPTY;
        tile.tile_type = TileType::Farm;
        tile.supply.0[1] = 12.0;
        let before = tile;
        tile.clear();
        assert_eq!(tile, before);
    }
}
