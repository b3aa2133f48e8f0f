use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Places `config.mines` mines uniformly at random, reproducible from `seed`.
///
/// Configs that leave no safe cell or have an empty side are rejected.
pub fn place_mines(config: GameConfig, seed: u64) -> Result<MineLayout> {
    RandomMinefieldGenerator::new(seed).generate(config)
}
