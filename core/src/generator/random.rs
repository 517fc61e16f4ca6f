use super::*;

/// Purely random coloring from a fixed seed: the same seed and config always
/// reproduce the same board.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig, palette: &Palette) -> Result<Grid> {
        use rand::prelude::*;

        if usize::from(config.colors) != palette.colors().len() {
            log::warn!(
                "Palette size mismatch, config declares {} but palette holds {}",
                config.colors,
                palette.colors().len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        Grid::build(config.size, palette, &mut rng)
    }
}
