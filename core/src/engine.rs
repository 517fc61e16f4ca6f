use core::num::Saturating;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ongoing
    }
}

/// Turn-based driver for one flood-fill game: move legality, color
/// absorption, and termination over an owned [`Grid`].
///
/// Commands never fail. Illegal moves are ignored without a rejection
/// signal; callers that need one compare [`FloodGame::moves_used`] before
/// and after.
#[derive(Clone, Debug)]
pub struct FloodGame {
    config: GameConfig,
    palette: Palette,
    grid: Grid,
    moves_used: CellCount,
    ticks: Saturating<u32>,
    status: GameStatus,
    rng: SmallRng,
}

impl FloodGame {
    /// Starts a fresh game: validates `config`, samples a palette, and
    /// colors a new board, all from the given seed.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let palette = Palette::sample(config.colors, &mut rng)?;
        let grid = Grid::build(config.size, &palette, &mut rng)?;

        Ok(Self {
            config,
            palette,
            grid,
            moves_used: 0,
            ticks: Saturating(0),
            status: Default::default(),
            rng,
        })
    }

    /// Adopts an explicit board and palette, deriving the config from them.
    /// Used to replay known positions.
    pub fn from_grid(grid: Grid, palette: Palette, seed: u64) -> Result<Self> {
        let config = GameConfig::new(grid.size(), palette.len())?;

        Ok(Self {
            config,
            palette,
            grid,
            moves_used: 0,
            ticks: Saturating(0),
            status: Default::default(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn cell_at(&self, coords: Coord2) -> CellSnapshot {
        self.grid.cell_at(coords)
    }

    pub fn moves_used(&self) -> CellCount {
        self.moves_used
    }

    pub fn move_budget(&self) -> CellCount {
        self.config.move_budget()
    }

    pub fn moves_left(&self) -> CellCount {
        self.move_budget().saturating_sub(self.moves_used)
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.0
    }

    /// Absorbs the color of the cell at `coords` into the flooded region.
    ///
    /// Ignored when the game is finished, the budget is spent, `coords` is
    /// off the board, the target is already flooded, or its color already
    /// matches the anchor.
    pub fn apply_move(&mut self, coords: Coord2) {
        if self.status.is_finished() || self.moves_used >= self.move_budget() {
            log::debug!("move at {:?} ignored, game is over", coords);
            return;
        }

        let Some(target) = self.grid.get(coords) else {
            log::debug!("move at {:?} ignored, outside the board", coords);
            return;
        };
        if target.flooded || target.color == self.grid.anchor_color() {
            log::debug!("move at {:?} ignored, nothing to absorb", coords);
            return;
        }

        self.grid.set_anchor_color(target.color);
        self.moves_used += 1;
        self.grid.recompute_flood();
        self.settle_outcome();
    }

    /// One logical tick: flooded cells catch up to the anchor's color and
    /// the region is re-evaluated. No effect once the game is finished.
    pub fn advance(&mut self) {
        if self.status.is_finished() {
            return;
        }

        self.grid.absorb_anchor_color();
        self.grid.recompute_flood();
        self.ticks += 1;
        self.settle_outcome();
    }

    /// Repaints the board from the retained palette and starts over. Board
    /// size, palette, and move budget carry across.
    pub fn reset(&mut self) {
        log::debug!("game reset, repainting {0}x{0} board", self.config.size);
        self.grid.repaint_random(&self.palette, &mut self.rng);
        self.moves_used = 0;
        self.ticks = Saturating(0);
        self.status = GameStatus::Ongoing;
    }

    fn settle_outcome(&mut self) {
        if self.grid.all_flooded() {
            self.status = GameStatus::Won;
        } else if self.moves_used >= self.move_budget() {
            self.status = GameStatus::Lost;
        }
    }
}
