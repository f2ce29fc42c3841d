use ndarray::Array2;

use super::*;

/// Places mines uniformly at random, resampling any coordinate that already holds one.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        // rejection sampling only terminates with at least one free tile
        config.validate()?;

        let (size_x, size_y) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(nd_shape(config.size));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut rejected = 0usize;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} (seed {}, {} rejected samples)",
            mines_placed,
            size_x,
            size_y,
            self.seed,
            rejected
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}
