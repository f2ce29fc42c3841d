use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BORDER_COLOR: Color = Color::rgb(0, 0, 255);
pub const BACKGROUND_COLOR: Color = Color::rgb(192, 192, 192);

/// Pixel size of the win and loss banners.
pub const BANNER_SIZE: (i32, i32) = (144, 48);

/// Pre-rendered images the drawing surface knows how to blit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    /// Raised, unrevealed tile.
    Button,
    /// Open tile showing its adjacent mine count, 0 is blank.
    Number(u8),
    Mine,
    /// The mine that ended the game.
    RedMine,
    Flag,
    /// Marks a flag that was placed on a safe tile.
    Cross,
    WinBanner,
    LoseBanner,
}

/// Drawing surface provided by the windowing layer.
pub trait Surface {
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
    fn draw_sprite(&mut self, sprite: Sprite, pos: PixelPos);
}

impl Tile {
    /// Sprites to draw for this tile, bottom first.
    ///
    /// With `reveal_mines` set the game is lost and every mine is exposed,
    /// flags are shown as right or wrong.
    pub fn sprites(&self, reveal_mines: bool) -> (Sprite, Option<Sprite>) {
        use Sprite::*;
        use TileState::*;

        match (self.state(), reveal_mines, self.has_mine()) {
            (Hidden, true, true) => (Number(0), Some(Mine)),
            (Hidden, _, _) => (Button, None),
            (Flagged, true, true) => (Mine, Some(Flag)),
            (Flagged, true, false) => (Mine, Some(Cross)),
            (Flagged, false, _) => (Button, Some(Flag)),
            (Revealed, _, true) => (Number(0), Some(RedMine)),
            (Revealed, _, false) => (Number(self.adjacent_mines().unwrap_or_default()), None),
        }
    }
}

impl Field {
    /// Draws the frame, the background, then every tile. Does not modify the field.
    pub fn draw(&self, surface: &mut impl Surface) {
        let boundary = self.boundary();
        surface.fill_rect(boundary.expand(BORDER_THICKNESS), BORDER_COLOR);
        surface.fill_rect(boundary, BACKGROUND_COLOR);

        let reveal_mines = self.mine_triggered();
        for tile in self.tiles() {
            let pos = self.grid_to_pixel(tile.coords());
            let (base, overlay) = tile.sprites(reveal_mines);
            surface.draw_sprite(base, pos);
            if let Some(overlay) = overlay {
                surface.draw_sprite(overlay, pos);
            }
        }
    }
}
