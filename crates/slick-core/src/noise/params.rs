use serde::{Deserialize, Serialize};

use super::interpolant::Interpolant;
use crate::grid::{Resolution, Tileable};

/// Octave stack for fractal noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Noise periods across the field for the first octave.
    pub resolution: Resolution,
    /// Number of Perlin layers, at least 1.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Integer frequency multiplier between octaves, so every octave keeps an
    /// integer resolution.
    pub lacunarity: u32,
    pub tileable: Tileable,
    pub interpolant: Interpolant,
}

impl FractalParams {
    /// Resolution used by octave `i` (0-based), or `None` on overflow.
    pub fn octave_resolution(&self, i: u32) -> Option<Resolution> {
        let factor = (self.lacunarity as usize).checked_pow(i)?;
        Some(Resolution::new(
            self.resolution.rows.checked_mul(factor)?,
            self.resolution.cols.checked_mul(factor)?,
        ))
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            resolution: Resolution::new(2, 2),
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2,
            tileable: Tileable::NONE,
            interpolant: Interpolant::Quintic,
        }
    }
}
