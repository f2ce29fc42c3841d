use std::fmt;

use sapper_core::{BORDER_COLOR, Color, PixelPos, PixelRect, Sprite, Surface, TILE_SIZE};

/// Character grid standing in for a frame buffer, one character per tile-sized cell.
#[derive(Clone, Debug)]
pub struct TextCanvas {
    viewport: PixelRect,
    cells: Vec<Vec<char>>,
}

impl TextCanvas {
    /// Canvas showing the field plus a one-tile margin for its frame.
    pub fn around(field: PixelRect) -> Self {
        let viewport = field.expand(TILE_SIZE);
        let cols = (viewport.width / TILE_SIZE) as usize;
        let rows = (viewport.height / TILE_SIZE) as usize;
        Self {
            viewport,
            cells: vec![vec![' '; cols]; rows],
        }
    }

    fn cell_of(&self, (x, y): PixelPos) -> Option<(usize, usize)> {
        if !self.viewport.contains((x, y)) {
            return None;
        }
        let col = (x - self.viewport.left) / TILE_SIZE;
        let row = (y - self.viewport.top) / TILE_SIZE;
        Some((col as usize, row as usize))
    }

    fn write_text(&mut self, pos: PixelPos, text: &str) {
        let Some((col, row)) = self.cell_of(pos) else {
            return;
        };
        let line = &mut self.cells[row];
        for (cell, ch) in line[col..].iter_mut().zip(text.chars()) {
            *cell = ch;
        }
    }
}

fn sprite_char(sprite: Sprite) -> char {
    match sprite {
        Sprite::Button => '.',
        Sprite::Number(0) => ' ',
        Sprite::Number(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
        Sprite::Mine => '*',
        Sprite::RedMine => '@',
        Sprite::Flag => 'F',
        Sprite::Cross => 'x',
        Sprite::WinBanner | Sprite::LoseBanner => ' ',
    }
}

impl Surface for TextCanvas {
    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let fill = if color == BORDER_COLOR { '#' } else { ' ' };
        let viewport = self.viewport;
        for (row, line) in self.cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let center = (
                    viewport.left + col as i32 * TILE_SIZE + TILE_SIZE / 2,
                    viewport.top + row as i32 * TILE_SIZE + TILE_SIZE / 2,
                );
                if rect.contains(center) {
                    *cell = fill;
                }
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: PixelPos) {
        match sprite {
            Sprite::WinBanner => self.write_text(pos, " YOU WIN! "),
            Sprite::LoseBanner => self.write_text(pos, " BOOM! "),
            _ => {
                if let Some((col, row)) = self.cell_of(pos) {
                    self.cells[row][col] = sprite_char(sprite);
                }
            }
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.cells.first().map_or(0, Vec::len);
        // column numbers, skipping the frame column
        let header: String = (0..cols.saturating_sub(2))
            .map(|col| char::from_digit((col % 10) as u32, 10).unwrap_or(' '))
            .collect();
        writeln!(f, "  {header}")?;

        let last = self.cells.len().saturating_sub(1);
        for (row, line) in self.cells.iter().enumerate() {
            let label = if row == 0 || row == last {
                ' '
            } else {
                char::from_digit(((row - 1) % 10) as u32, 10).unwrap_or(' ')
            };
            let line: String = line.iter().collect();
            writeln!(f, "{label}{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{Controller, Field, MineLayout};

    fn controller(mines: &[(u8, u8)]) -> Controller {
        let layout = MineLayout::from_mine_coords((3, 2), mines).unwrap();
        Controller::new(Field::new(layout, (0, 0)).unwrap())
    }

    #[test]
    fn draws_frame_and_buttons() {
        let controller = controller(&[(0, 0)]);
        let mut canvas = TextCanvas::around(controller.field().boundary());

        controller.compose_frame(&mut canvas);

        assert_eq!(canvas.to_string(), "  012\n #####\n0#...#\n1#...#\n #####\n");
    }

    #[test]
    fn draws_numbers_and_flags() {
        let mut controller = controller(&[(0, 0)]);
        let field = controller.field().clone();
        let mut pointer = sapper_core::PressQueue::new();
        pointer.push(field.grid_to_pixel((0, 1)), sapper_core::PointerButton::Right);
        pointer.push(field.grid_to_pixel((2, 1)), sapper_core::PointerButton::Left);
        controller.update(&mut pointer).unwrap();
        controller.update(&mut pointer).unwrap();
        let mut canvas = TextCanvas::around(field.boundary());

        controller.compose_frame(&mut canvas);

        let text = canvas.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], "0#.1 #");
        assert_eq!(lines[3], "1#F1 #");
    }

    #[test]
    fn banner_is_clipped_to_canvas() {
        let mut canvas = TextCanvas::around(PixelRect::new(0, 0, 32, 16));

        canvas.draw_sprite(Sprite::LoseBanner, (0, 0));
        canvas.draw_sprite(Sprite::WinBanner, (500, 500));

        let text = canvas.to_string();
        assert_eq!(text.lines().nth(2), Some("0  BO"));
    }
}
