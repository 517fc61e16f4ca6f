use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig, palette: &Palette) -> Result<Grid>;
}
