#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use controller::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use geometry::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod controller;
mod error;
mod field;
mod generator;
mod geometry;
mod render;
mod tile;
mod types;

/// Tiles across the standard field.
pub const FIELD_WIDTH: Coord = 20;
/// Tiles down the standard field.
pub const FIELD_HEIGHT: Coord = 16;
/// Mines hidden in the standard field.
pub const MINE_COUNT: CellCount = 8;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// The only difficulty the game ships with.
    pub const fn standard() -> Self {
        Self::new_unchecked((FIELD_WIDTH, FIELD_HEIGHT), MINE_COUNT)
    }

    /// Requires at least one mine and at least one safe tile.
    pub fn validate(&self) -> Result<()> {
        if self.mines == 0 {
            Err(GameError::NoMines)
        } else if self.mines >= self.total_tiles() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a `(height, width)` shaped mask.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // masks are shaped from `Coord` sizes, so the count fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(nd_shape(size));

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn total_tiles(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Coordinates of every mine, row by row.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((y, x), _)| (x as Coord, y as Coord))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
