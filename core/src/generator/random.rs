use alloc::vec::Vec;

use super::*;

/// Purely random generation strategy: shuffles every cell index and mines the first `mines` of them.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let config = GameConfig::new(config.size, config.mines).inspect_err(|err| {
            log::warn!(
                "Refusing to place {} mines on a {}x{} board: {}",
                config.mines,
                config.size.0,
                config.size.1,
                err
            );
        })?;
        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);

        let mut cells: Vec<usize> = (0..total_cells).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        cells.shuffle(&mut rng);

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &index in &cells[..mines] {
            mine_mask[from_flat_index(index, config.size).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Placed {} mines on a {}x{} board with seed {}",
            layout.mine_count(),
            config.size.0,
            config.size.1,
            self.seed
        );
        Ok(layout)
    }
}
