use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Flagged,
    Revealed,
}

/// One cell of the field.
///
/// A tile knows its own coordinates but nothing about its neighbors; the
/// owning [`Field`] looks neighbors up by coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    coords: Coord2,
    state: TileState,
    has_mine: bool,
    adjacent_mines: Option<u8>,
}

impl Tile {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            state: TileState::Hidden,
            has_mine: false,
            adjacent_mines: None,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn state(&self) -> TileState {
        self.state
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    /// Number of mines around this tile, `None` until the field has counted them.
    pub const fn adjacent_mines(&self) -> Option<u8> {
        self.adjacent_mines
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, TileState::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, TileState::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, TileState::Revealed)
    }

    pub(crate) fn spawn_mine(&mut self) -> Result<()> {
        if self.has_mine {
            return Err(GameError::MineAlreadyPlaced);
        }
        self.has_mine = true;
        Ok(())
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) -> Result<()> {
        if self.adjacent_mines.is_some() {
            return Err(GameError::AdjacentCountAlreadySet);
        }
        self.adjacent_mines = Some(count);
        Ok(())
    }

    /// Reveals a hidden tile, returns whether anything changed.
    ///
    /// Flagged tiles stay flagged, they must be unflagged first.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.is_hidden() {
            self.state = TileState::Revealed;
            true
        } else {
            false
        }
    }

    pub(crate) fn toggle_flag(&mut self) -> MarkOutcome {
        use TileState::*;

        match self.state {
            Hidden => {
                self.state = Flagged;
                MarkOutcome::Changed
            }
            Flagged => {
                self.state = Hidden;
                MarkOutcome::Changed
            }
            Revealed => MarkOutcome::NoChange,
        }
    }
}
