#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use color::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod color;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub colors: ColorCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, colors: ColorCount) -> Self {
        Self { size, colors }
    }

    pub fn new(size: Coord, colors: ColorCount) -> Result<Self> {
        let config = Self::new_unchecked(size, colors);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(Grid::MIN_SIZE..=Grid::MAX_SIZE).contains(&self.size)
            || !(Palette::MIN_COLORS..=Palette::MAX_COLORS).contains(&self.colors)
        {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Fixed allowance of moves for one game: N² − N.
    pub const fn move_budget(&self) -> CellCount {
        mult(self.size, self.size) - self.size as CellCount
    }
}

/// Read-only view of one board position.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub coords: Coord2,
    pub color: FloodColor,
    pub flooded: bool,
}

impl CellSnapshot {
    pub const fn row(&self) -> Coord {
        self.coords.0
    }

    pub const fn col(&self) -> Coord {
        self.coords.1
    }
}

impl fmt::Display for CellSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell[({},{}) {}]",
            self.coords.0,
            self.coords.1,
            self.color.name()
        )
    }
}

/// Square board of colored cells plus the flooded region anchored at the
/// top-left corner. Cells live in flat row-major storage; adjacency is index
/// arithmetic, so there is no cell-to-cell reference graph to keep symmetric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    colors: Array2<FloodColor>,
    flooded: Array2<bool>,
}

impl Grid {
    pub const MIN_SIZE: Coord = 2;
    pub const MAX_SIZE: Coord = 14;

    /// The flood region grows from here. Always flooded.
    pub const ANCHOR: Coord2 = (0, 0);

    /// Allocates an N×N board with uniformly random colors from `palette`.
    /// Only the anchor starts flooded; call [`Grid::recompute_flood`] to
    /// extend the region over same-colored neighbors.
    pub fn build<R: Rng + ?Sized>(size: Coord, palette: &Palette, rng: &mut R) -> Result<Self> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }

        let dim = (size as usize, size as usize);
        let colors = Array2::from_shape_simple_fn(dim, || palette.pick(rng));
        Self::from_colors(colors)
    }

    /// Builds a board from an explicit color assignment. Used by tests and
    /// by callers replaying a known position.
    pub fn from_colors(colors: Array2<FloodColor>) -> Result<Self> {
        let dim = colors.dim();
        if dim.0 != dim.1 {
            return Err(GameError::InvalidBoardShape);
        }

        let size: Coord = dim.0.try_into().map_err(|_| GameError::InvalidSize)?;
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }

        let mut flooded = Array2::default(dim);
        flooded[Self::ANCHOR.to_nd_index()] = true;

        Ok(Self { colors, flooded })
    }

    pub fn size(&self) -> Coord {
        self.colors.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        self.colors.len().try_into().unwrap()
    }

    pub fn anchor_color(&self) -> FloodColor {
        self.colors[Self::ANCHOR.to_nd_index()]
    }

    pub(crate) fn set_anchor_color(&mut self, color: FloodColor) {
        self.colors[Self::ANCHOR.to_nd_index()] = color;
    }

    pub fn color_at(&self, coords: Coord2) -> FloodColor {
        self.colors[coords.to_nd_index()]
    }

    pub fn is_flooded(&self, coords: Coord2) -> bool {
        self.flooded[coords.to_nd_index()]
    }

    pub fn cell_at(&self, coords: Coord2) -> CellSnapshot {
        CellSnapshot {
            coords,
            color: self.color_at(coords),
            flooded: self.is_flooded(coords),
        }
    }

    /// Bounds-checked variant of [`Grid::cell_at`].
    pub fn get(&self, coords: Coord2) -> Option<CellSnapshot> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Some(self.cell_at(coords))
        } else {
            None
        }
    }

    /// The (≤4) adjacent positions that exist around `coords`.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.colors.iter_neighbors(coords)
    }

    /// Row-major snapshots of every cell.
    pub fn iter_cells(&self) -> impl Iterator<Item = CellSnapshot> + '_ {
        self.colors.indexed_iter().map(|((row, col), &color)| {
            let coords = (row as Coord, col as Coord);
            CellSnapshot {
                coords,
                color,
                flooded: self.flooded[[row, col]],
            }
        })
    }

    /// Extends the flooded region to its closure: an unflooded cell joins
    /// when it touches a flooded cell and carries the anchor's current color.
    /// Flags are never cleared here, so the region is monotone between
    /// repaints and recomputation is idempotent.
    pub fn recompute_flood(&mut self) {
        let anchor_color = self.anchor_color();
        self.flooded[Self::ANCHOR.to_nd_index()] = true;

        let mut frontier: VecDeque<Coord2> = self
            .flooded
            .indexed_iter()
            .filter(|&(_, &flooded)| flooded)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();

        while let Some(coords) = frontier.pop_front() {
            for (neighbor, color) in self.colors.iter_neighbor_cells_with_index(coords) {
                let index = neighbor.to_nd_index();
                if color == anchor_color && !self.flooded[index] {
                    self.flooded[index] = true;
                    frontier.push_back(neighbor);
                }
            }
        }
    }

    pub fn all_flooded(&self) -> bool {
        self.flooded.iter().all(|&flooded| flooded)
    }

    pub fn flooded_count(&self) -> CellCount {
        self.flooded
            .iter()
            .filter(|&&flooded| flooded)
            .count()
            .try_into()
            .unwrap()
    }

    /// Reassigns every cell a fresh random color and collapses the flooded
    /// region back to the anchor alone.
    pub fn repaint_random<R: Rng + ?Sized>(&mut self, palette: &Palette, rng: &mut R) {
        for color in self.colors.iter_mut() {
            *color = palette.pick(rng);
        }
        self.flooded.fill(false);
        self.flooded[Self::ANCHOR.to_nd_index()] = true;
    }

    /// Repaints every flooded cell lagging behind the anchor's color. The
    /// engine runs this on each tick so the region visibly catches up to the
    /// latest absorbed color.
    pub(crate) fn absorb_anchor_color(&mut self) {
        let anchor_color = self.anchor_color();
        for (index, color) in self.colors.indexed_iter_mut() {
            if self.flooded[index] && *color != anchor_color {
                *color = anchor_color;
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = FloodColor;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.colors[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                write!(f, "{} ", self.cell_at((row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use rand::prelude::*;
    use FloodColor::*;

    fn grid_2x2(colors: [FloodColor; 4]) -> Grid {
        Grid::from_colors(Array2::from_shape_vec((2, 2), colors.to_vec()).unwrap()).unwrap()
    }

    #[test]
    fn build_colors_every_cell_from_the_palette() {
        let mut rng = SmallRng::seed_from_u64(5);
        let palette = Palette::from_colors(&[Yellow, Orange, Pink]).unwrap();

        let grid = Grid::build(14, &palette, &mut rng).unwrap();

        assert_eq!(grid.total_cells(), 196);
        assert_eq!(grid.iter_cells().count(), 196);
        assert!(grid.iter_cells().all(|cell| palette.contains(cell.color)));
        assert!(grid.is_flooded(Grid::ANCHOR));
        assert_eq!(grid.flooded_count(), 1);
    }

    #[test]
    fn build_rejects_out_of_range_sizes() {
        let mut rng = SmallRng::seed_from_u64(5);
        let palette = Palette::from_colors(&[Yellow, Orange, Pink]).unwrap();

        assert_eq!(
            Grid::build(1, &palette, &mut rng).unwrap_err(),
            GameError::InvalidSize
        );
        assert_eq!(
            Grid::build(15, &palette, &mut rng).unwrap_err(),
            GameError::InvalidSize
        );
    }

    #[test]
    fn from_colors_rejects_non_square_boards() {
        let colors = Array2::from_shape_vec((2, 3), alloc::vec![Yellow; 6]).unwrap();

        assert_eq!(
            Grid::from_colors(colors).unwrap_err(),
            GameError::InvalidBoardShape
        );
    }

    #[test]
    fn recompute_flood_absorbs_connected_anchor_colored_cells() {
        let mut grid = grid_2x2([Yellow, Orange, Yellow, Pink]);

        grid.recompute_flood();

        assert!(grid.is_flooded((0, 0)));
        assert!(grid.is_flooded((1, 0)));
        assert!(!grid.is_flooded((0, 1)));
        assert!(!grid.is_flooded((1, 1)));
    }

    #[test]
    fn recompute_flood_reaches_concave_regions() {
        // A C-shaped yellow region: a single row-major sweep would miss
        // (2, 0) until a later pass, the closure picks it up immediately.
        let colors = Array2::from_shape_vec(
            (3, 3),
            alloc::vec![
                Yellow, Yellow, Yellow, //
                Orange, Orange, Yellow, //
                Yellow, Yellow, Yellow,
            ],
        )
        .unwrap();
        let mut grid = Grid::from_colors(colors).unwrap();

        grid.recompute_flood();

        assert_eq!(grid.flooded_count(), 7);
        assert!(grid.is_flooded((2, 0)));
        assert!(!grid.is_flooded((1, 0)));
    }

    #[test]
    fn recompute_flood_is_idempotent() {
        let mut grid = grid_2x2([Yellow, Yellow, Orange, Pink]);

        grid.recompute_flood();
        let first: Vec<bool> = grid.iter_cells().map(|cell| cell.flooded).collect();
        grid.recompute_flood();
        let second: Vec<bool> = grid.iter_cells().map(|cell| cell.flooded).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn repaint_random_collapses_the_region_to_the_anchor() {
        let mut rng = SmallRng::seed_from_u64(5);
        let palette = Palette::from_colors(&[Yellow, Orange, Pink]).unwrap();
        let mut grid = grid_2x2([Yellow, Yellow, Yellow, Yellow]);

        grid.recompute_flood();
        assert!(grid.all_flooded());

        grid.repaint_random(&palette, &mut rng);

        assert!(grid.is_flooded(Grid::ANCHOR));
        assert_eq!(grid.flooded_count(), 1);
        assert!(grid.iter_cells().all(|cell| palette.contains(cell.color)));
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid = grid_2x2([Yellow, Orange, Yellow, Pink]);

        assert!(grid.get((1, 1)).is_some());
        assert!(grid.get((2, 0)).is_none());
        assert!(grid.get((0, 2)).is_none());
    }

    #[test]
    fn board_text_lists_cells_row_by_row() {
        let grid = grid_2x2([Yellow, Orange, Yellow, Pink]);

        assert_eq!(
            grid.to_string(),
            "Cell[(0,0) YELLOW] Cell[(0,1) ORANGE] \nCell[(1,0) YELLOW] Cell[(1,1) PINK] \n"
        );
    }

    #[test]
    fn grid_serializes_round_trip() {
        let mut grid = grid_2x2([Yellow, Orange, Yellow, Pink]);
        grid.recompute_flood();

        let encoded = serde_json::to_string(&grid).unwrap();
        let decoded: Grid = serde_json::from_str(&encoded).unwrap();

        assert_eq!(grid, decoded);
    }

    #[test]
    fn move_budget_is_cells_minus_side() {
        assert_eq!(GameConfig::new_unchecked(2, 3).move_budget(), 2);
        assert_eq!(GameConfig::new_unchecked(14, 8).move_budget(), 182);
    }

    #[test]
    fn config_validation_never_clamps() {
        assert_eq!(GameConfig::new(1, 3), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(15, 3), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(8, 2), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(8, 9), Err(GameError::InvalidConfiguration));
        assert!(GameConfig::new(8, 6).is_ok());
    }
}
