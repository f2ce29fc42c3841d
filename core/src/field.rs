use ndarray::Array2;

use crate::*;

/// How many hops a safe reveal spreads to neighboring tiles.
///
/// Spreading stops after this many hops even across zero tiles, so large
/// empty regions open up in pieces rather than all at once.
pub const FLOOD_DEPTH: u8 = 2;

/// The grid of tiles together with the outcome of the current game.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    boundary: PixelRect,
    mine_triggered: bool,
    revealed_safe: CellCount,
}

impl Field {
    /// Builds a field from a known mine layout, with its top-left tile drawn at `origin`.
    ///
    /// Any layout leaving at least one safe tile is accepted, including one without mines.
    pub fn new(mine_layout: MineLayout, origin: PixelPos) -> Result<Self> {
        let size = mine_layout.size();
        let mine_count = mine_layout.mine_count();
        if mine_count >= mine_layout.total_tiles() {
            return Err(GameError::TooManyMines);
        }

        let mut tiles =
            Array2::from_shape_fn(nd_shape(size), |(y, x)| Tile::new((x as Coord, y as Coord)));
        for coords in mine_layout.iter_mines() {
            tiles[coords.to_nd_index()].spawn_mine()?;
        }

        let counts = Array2::from_shape_fn(nd_shape(size), |(y, x)| {
            tiles
                .iter_neighbors((x as Coord, y as Coord))
                .filter(|&pos| tiles[pos.to_nd_index()].has_mine())
                .count() as u8
        });
        for (tile, &count) in tiles.iter_mut().zip(counts.iter()) {
            tile.set_adjacent_mines(count)?;
        }

        log::debug!(
            "Field {}x{} with {} mines at {:?}",
            size.0,
            size.1,
            mine_count,
            origin
        );
        Ok(Self {
            tiles,
            mine_count,
            boundary: PixelRect::for_grid(origin, size),
            mine_triggered: false,
            revealed_safe: 0,
        })
    }

    /// Generates mines for `config` and centers the field on the screen.
    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let mine_layout = generator.generate(config)?;
        let origin = PixelRect::screen().centered_grid(mine_layout.size()).origin();
        Self::new(mine_layout, origin)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn boundary(&self) -> PixelRect {
        self.boundary
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.tiles.len() as CellCount - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.tiles[coords.to_nd_index()])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Whether a mine has been revealed. Once set this never clears.
    pub fn mine_triggered(&self) -> bool {
        self.mine_triggered
    }

    pub fn all_tiles_revealed(&self) -> bool {
        self.revealed_safe == self.safe_tile_count()
    }

    pub fn is_finished(&self) -> bool {
        self.mine_triggered || self.all_tiles_revealed()
    }

    pub fn contains_pixel(&self, pixel: PixelPos) -> bool {
        self.boundary.contains(pixel)
    }

    pub fn pixel_to_grid(&self, pixel: PixelPos) -> Result<Coord2> {
        if !self.boundary.contains(pixel) {
            return Err(GameError::PixelOutOfBounds(pixel.0, pixel.1));
        }
        let (left, top) = self.boundary.origin();
        let x = (pixel.0 - left) / TILE_SIZE;
        let y = (pixel.1 - top) / TILE_SIZE;
        Ok((x as Coord, y as Coord))
    }

    /// Top-left pixel of the tile at `coords`.
    pub fn grid_to_pixel(&self, (x, y): Coord2) -> PixelPos {
        let (left, top) = self.boundary.origin();
        (left + x as i32 * TILE_SIZE, top + y as i32 * TILE_SIZE)
    }

    pub fn reveal_tile(&mut self, pixel: PixelPos) -> Result<RevealOutcome> {
        let coords = self.pixel_to_grid(pixel)?;
        self.reveal_at(coords)
    }

    pub fn flag_tile(&mut self, pixel: PixelPos) -> Result<MarkOutcome> {
        let coords = self.pixel_to_grid(pixel)?;
        self.flag_at(coords)
    }

    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];

        if !tile.reveal() {
            return Ok(RevealOutcome::NoChange);
        }

        if tile.has_mine() {
            self.mine_triggered = true;
            log::info!("Mine triggered at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.revealed_safe += 1;
        self.flood(coords, FLOOD_DEPTH);
        log::debug!(
            "Revealed {:?}, {}/{} safe tiles open",
            coords,
            self.revealed_safe,
            self.safe_tile_count()
        );

        if self.all_tiles_revealed() {
            log::info!("All safe tiles revealed");
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    pub fn flag_at(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()].toggle_flag())
    }

    /// Depth-first reveal of safe neighbors, `budget` hops deep.
    ///
    /// A tile revealed at the last hop does not spread further, even if a
    /// shallower path to it exists later in the iteration.
    fn flood(&mut self, coords: Coord2, budget: u8) {
        if budget == 0 {
            return;
        }

        for pos in self.tiles.iter_neighbors(coords) {
            let tile = &mut self.tiles[pos.to_nd_index()];
            if !tile.has_mine() && tile.reveal() {
                self.revealed_safe += 1;
                self.flood(pos, budget - 1);
            }
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, mines: &[Coord2]) -> Field {
        Field::new(MineLayout::from_mine_coords(size, mines).unwrap(), (0, 0)).unwrap()
    }

    fn brute_force_count(field: &Field, (x, y): Coord2) -> u8 {
        let (w, h) = field.size();
        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if (nx, ny) != (x, y) && field.tile_at((nx, ny)).unwrap().has_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn generated_fields_have_exact_mines_and_counts() {
        for seed in 0..64 {
            let config = GameConfig::new((6, 6), 1 + (seed % 34) as CellCount).unwrap();
            let field = Field::generate(config, RandomMineGenerator::new(seed)).unwrap();

            let mines = field.tiles().filter(|tile| tile.has_mine()).count();
            assert_eq!(mines as CellCount, config.mines);
            for tile in field.tiles() {
                assert_eq!(
                    tile.adjacent_mines(),
                    Some(brute_force_count(&field, tile.coords()))
                );
            }
        }
    }

    #[test]
    fn adjacency_excludes_own_tile() {
        let field = field((3, 3), &[(0, 0), (1, 1)]);

        assert_eq!(field.tile_at((1, 1)).unwrap().adjacent_mines(), Some(1));
        assert_eq!(field.tile_at((0, 0)).unwrap().adjacent_mines(), Some(1));
        assert_eq!(field.tile_at((2, 2)).unwrap().adjacent_mines(), Some(1));
        assert_eq!(field.tile_at((1, 0)).unwrap().adjacent_mines(), Some(2));
    }

    #[test]
    fn full_layout_is_rejected() {
        let layout = MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]).unwrap();

        assert_eq!(Field::new(layout, (0, 0)), Err(GameError::TooManyMines));
    }

    #[test]
    fn generated_field_is_centered() {
        let field = Field::generate(GameConfig::standard(), RandomMineGenerator::new(1)).unwrap();

        assert_eq!(field.boundary(), PixelRect::new(240, 172, 320, 256));
        assert_eq!(field.total_mines(), MINE_COUNT);
        assert_eq!(field.safe_tile_count(), 320 - MINE_COUNT);
    }

    #[test]
    fn pixel_grid_round_trip() {
        let field = Field::new(
            MineLayout::from_mine_coords((6, 6), &[]).unwrap(),
            (100, 50),
        )
        .unwrap();
        let boundary = field.boundary();

        for y in boundary.top..boundary.bottom() {
            for x in boundary.left..boundary.right() {
                let coords = field.pixel_to_grid((x, y)).unwrap();
                let (tx, ty) = field.grid_to_pixel(coords);
                assert!(tx <= x && x < tx + TILE_SIZE);
                assert!(ty <= y && y < ty + TILE_SIZE);
                assert_eq!(field.pixel_to_grid((tx, ty)), Ok(coords));
            }
        }
        assert_eq!(field.grid_to_pixel((2, 3)), (132, 98));
    }

    #[test]
    fn pixel_outside_is_an_error() {
        let mut field = field((6, 6), &[(5, 5)]);

        assert_eq!(
            field.pixel_to_grid((96, 0)),
            Err(GameError::PixelOutOfBounds(96, 0))
        );
        assert_eq!(
            field.reveal_tile((-1, 4)),
            Err(GameError::PixelOutOfBounds(-1, 4))
        );
        assert_eq!(field.revealed_safe_count(), 0);
    }

    #[test]
    fn reveal_far_from_single_mine() {
        let mut field = field((6, 6), &[(5, 5)]);

        let outcome = field.reveal_tile((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert!(field.revealed_safe_count() > 1);
        assert!(!field.mine_triggered());
        assert!(field.tile_at((5, 5)).unwrap().is_hidden());
    }

    // Characterization of the two-hop depth-first flood: it does not open the
    // whole connected empty region.
    #[test]
    fn flood_from_center_is_two_hops_deep() {
        let mut field = field((6, 6), &[]);

        field.reveal_at((2, 2)).unwrap();

        assert_eq!(field.revealed_safe_count(), 25);
        for tile in field.tiles() {
            let (x, y) = tile.coords();
            assert_eq!(tile.is_revealed(), x <= 4 && y <= 4, "{:?}", (x, y));
        }
    }

    #[test]
    fn flood_from_corner_is_cut_by_depth_first_order() {
        let mut field = field((6, 6), &[]);

        field.reveal_at((0, 0)).unwrap();

        assert_eq!(field.revealed_safe_count(), 6);
        for tile in field.tiles() {
            let (x, y) = tile.coords();
            assert_eq!(tile.is_revealed(), x <= 2 && y <= 1, "{:?}", (x, y));
        }
    }

    #[test]
    fn flood_from_far_corner_opens_full_block() {
        let mut field = field((6, 6), &[]);

        field.reveal_at((5, 5)).unwrap();

        assert_eq!(field.revealed_safe_count(), 9);
        for tile in field.tiles() {
            let (x, y) = tile.coords();
            assert_eq!(tile.is_revealed(), x >= 3 && y >= 3, "{:?}", (x, y));
        }
    }

    #[test]
    fn flood_skips_mines_and_flags() {
        let mut field = field((3, 3), &[(2, 0)]);
        field.flag_at((0, 2)).unwrap();

        field.reveal_at((1, 1)).unwrap();

        assert!(field.tile_at((2, 0)).unwrap().is_hidden());
        assert!(field.tile_at((0, 2)).unwrap().is_flagged());
        assert!(!field.mine_triggered());
        assert_eq!(field.revealed_safe_count(), 7);
    }

    #[test]
    fn revealing_mine_is_permanent_loss() {
        let mut field = field((3, 3), &[(1, 1)]);

        assert_eq!(field.reveal_at((1, 1)).unwrap(), RevealOutcome::HitMine);
        assert!(field.mine_triggered());
        assert_eq!(field.revealed_safe_count(), 0);

        field.reveal_at((0, 0)).unwrap();
        field.flag_at((2, 2)).unwrap();
        field.flag_at((1, 1)).unwrap();
        assert!(field.mine_triggered());
        assert!(field.is_finished());
    }

    #[test]
    fn flagged_and_revealed_tiles_ignore_reveal() {
        let mut field = field((3, 3), &[(2, 2)]);

        assert_eq!(field.flag_at((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(field.reveal_at((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(field.revealed_safe_count(), 0);

        assert_eq!(field.flag_at((0, 0)).unwrap(), MarkOutcome::Changed);
        assert!(field.tile_at((0, 0)).unwrap().is_hidden());

        field.reveal_at((1, 0)).unwrap();
        let revealed = field.revealed_safe_count();
        assert_eq!(field.reveal_at((1, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(field.flag_at((1, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(field.revealed_safe_count(), revealed);
    }

    #[test]
    fn win_only_when_every_safe_tile_is_open() {
        let mut field = field((5, 1), &[(2, 0)]);

        assert_eq!(field.reveal_at((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(field.revealed_safe_count(), 2);
        assert!(!field.all_tiles_revealed());

        assert_eq!(field.reveal_at((4, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(field.revealed_safe_count(), 4);
        assert!(field.all_tiles_revealed());
        assert!(!field.mine_triggered());
    }

    #[test]
    fn invalid_grid_coords_are_rejected() {
        let mut field = field((3, 3), &[(0, 0)]);

        assert_eq!(field.reveal_at((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(field.flag_at((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(field.tile_at((9, 9)), Err(GameError::InvalidCoords));
    }
}
