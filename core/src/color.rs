use core::fmt;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Paint value a cell can hold, from the fixed superset of named colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloodColor {
    Blue,
    Green,
    Yellow,
    Red,
    Pink,
    Orange,
    Magenta,
    Gray,
}

impl FloodColor {
    pub const ALL: [FloodColor; 8] = [
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Red,
        Self::Pink,
        Self::Orange,
        Self::Magenta,
        Self::Gray,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "BLUE",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
            Self::Pink => "PINK",
            Self::Orange => "ORANGE",
            Self::Magenta => "MAGENTA",
            Self::Gray => "GRAY",
        }
    }
}

impl fmt::Display for FloodColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active set of distinct colors for one game. Sampled once at construction
/// and reused as paint values for every repaint afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: SmallVec<[FloodColor; 8]>,
}

impl Palette {
    pub const MIN_COLORS: ColorCount = 3;
    pub const MAX_COLORS: ColorCount = 8;

    /// Draws `count` colors from [`FloodColor::ALL`] without replacement.
    pub fn sample<R: Rng + ?Sized>(count: ColorCount, rng: &mut R) -> Result<Self> {
        if !(Self::MIN_COLORS..=Self::MAX_COLORS).contains(&count) {
            return Err(GameError::InvalidConfiguration);
        }

        let count = count as usize;
        let mut pool = FloodColor::ALL;
        for slot in 0..count {
            let picked = rng.random_range(slot..pool.len());
            pool.swap(slot, picked);
        }

        Ok(Self {
            colors: SmallVec::from_slice(&pool[..count]),
        })
    }

    /// Builds a palette from an explicit color list, rejecting out-of-range
    /// counts and repeated colors.
    pub fn from_colors(colors: &[FloodColor]) -> Result<Self> {
        let count: ColorCount = colors
            .len()
            .try_into()
            .map_err(|_| GameError::InvalidConfiguration)?;
        if !(Self::MIN_COLORS..=Self::MAX_COLORS).contains(&count) {
            return Err(GameError::InvalidConfiguration);
        }

        let mut seen: u8 = 0;
        for &color in colors {
            let bit = 1u8 << color as u8;
            if seen & bit != 0 {
                return Err(GameError::InvalidConfiguration);
            }
            seen |= bit;
        }

        Ok(Self {
            colors: SmallVec::from_slice(colors),
        })
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> FloodColor {
        self.colors[rng.random_range(0..self.colors.len())]
    }

    pub fn len(&self) -> ColorCount {
        self.colors.len() as ColorCount
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: FloodColor) -> bool {
        self.colors.contains(&color)
    }

    pub fn colors(&self) -> &[FloodColor] {
        &self.colors
    }
}
