//! Goods and per-good quantity vectors.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of distinct goods.
pub const GOOD_COUNT: usize = 2;

/// An abstract resource kind tracked per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Good {
    /// Harvested by forests.
    Wood = 0,
    /// Grown by farms.
    Wheat = 1,
}

impl Good {
    /// All goods in index order.
    pub const ALL: [Good; GOOD_COUNT] = [Good::Wood, Good::Wheat];

    /// Position of this good in a [`Goods`] vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Good::Wood => "wood",
            Good::Wheat => "wheat",
        }
    }
}

/// One `f32` quantity per good.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Goods(pub [f32; GOOD_COUNT]);

impl Goods {
    /// All quantities zero.
    pub const ZERO: Goods = Goods([0.0; GOOD_COUNT]);

    /// Copy of `self` with `good` set to `amount`.
    #[must_use]
    pub const fn with(self, good: Good, amount: f32) -> Self {
        let mut values = self.0;
        values[good.index()] = amount;
        Goods(values)
    }

    /// Whether every quantity is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Iterate over `(good, quantity)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Good, f32)> + '_ {
        Good::ALL.iter().map(|g| (*g, self.0[g.index()]))
    }
}

impl Index<Good> for Goods {
    type Output = f32;

    fn index(&self, good: Good) -> &f32 {
        &self.0[good.index()]
    }
}

impl IndexMut<Good> for Goods {
    fn index_mut(&mut self, good: Good) -> &mut f32 {
        &mut self.0[good.index()]
    }
}
