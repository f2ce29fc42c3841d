use serde::{Deserialize, Serialize};

use crate::*;

/// Edge length of one tile sprite in pixels.
pub const TILE_SIZE: i32 = 16;
pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
/// Width of the frame drawn around the field.
pub const BORDER_THICKNESS: i32 = 10;

/// Pixel position `(x, y)` on the drawing surface, may lie off screen.
pub type PixelPos = (i32, i32);

/// Axis-aligned rectangle in pixel space, `right` and `bottom` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn screen() -> Self {
        Self::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Rectangle covering a grid of `size` tiles with its top-left corner at `origin`.
    pub const fn for_grid(origin: PixelPos, size: Coord2) -> Self {
        Self::new(
            origin.0,
            origin.1,
            size.0 as i32 * TILE_SIZE,
            size.1 as i32 * TILE_SIZE,
        )
    }

    /// Rectangle of `size` tiles centered inside `self`.
    pub const fn centered_grid(self, size: Coord2) -> Self {
        let width = size.0 as i32 * TILE_SIZE;
        let height = size.1 as i32 * TILE_SIZE;
        Self::new(
            self.left + (self.width - width) / 2,
            self.top + (self.height - height) / 2,
            width,
            height,
        )
    }

    pub const fn origin(self) -> PixelPos {
        (self.left, self.top)
    }

    pub const fn right(self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(self) -> i32 {
        self.top + self.height
    }

    pub const fn center(self) -> PixelPos {
        (self.left + self.width / 2, self.top + self.height / 2)
    }

    pub const fn contains(self, (x, y): PixelPos) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Grows the rectangle by `amount` pixels on every side.
    pub const fn expand(self, amount: i32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }
}
