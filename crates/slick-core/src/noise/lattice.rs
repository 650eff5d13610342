//! Random unit-gradient lattices.
use std::f64::consts::{SQRT_2, TAU};

use rand::Rng;

use super::interpolant::Interpolant;
use crate::error::{Result, SlickError};
use crate::grid::{Resolution, Tileable};

/// `(rows + 1) × (cols + 1)` unit gradient vectors, row-major.
///
/// With a tileable axis the last lattice line along it repeats the first, so
/// noise on opposite edges of the tile agrees exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLattice {
    gradients: Vec<[f64; 2]>,
    resolution: Resolution,
}

impl GradientLattice {
    /// Draw one uniform angle in `[0, 2π)` per lattice point.
    pub fn random<R: Rng + ?Sized>(resolution: Resolution, tileable: Tileable, rng: &mut R) -> Self {
        let n = (resolution.rows + 1) * (resolution.cols + 1);
        let angles: Vec<f64> = (0..n).map(|_| TAU * rng.gen::<f64>()).collect();
        Self::build(resolution, tileable, &angles)
    }

    /// Build from explicit angles (radians), row-major over the
    /// `(rows + 1) × (cols + 1)` lattice.
    pub fn from_angles(resolution: Resolution, tileable: Tileable, angles: &[f64]) -> Result<Self> {
        let n = (resolution.rows + 1) * (resolution.cols + 1);
        if angles.len() != n {
            return Err(SlickError::InvalidConfig(format!(
                "lattice {resolution} needs {n} angles, got {}",
                angles.len()
            )));
        }
        Ok(Self::build(resolution, tileable, angles))
    }

    fn build(resolution: Resolution, tileable: Tileable, angles: &[f64]) -> Self {
        let mut lattice = Self {
            gradients: angles.iter().map(|&a| [a.cos(), a.sin()]).collect(),
            resolution,
        };
        let (rows, cols) = (resolution.rows, resolution.cols);
        let stride = cols + 1;
        if tileable.rows {
            for c in 0..=cols {
                lattice.gradients[rows * stride + c] = lattice.gradients[c];
            }
        }
        if tileable.cols {
            for r in 0..=rows {
                lattice.gradients[r * stride + cols] = lattice.gradients[r * stride];
            }
        }
        lattice
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Gradient at lattice point `(i, j)`, `i ≤ rows`, `j ≤ cols`.
    #[inline]
    pub fn gradient(&self, i: usize, j: usize) -> [f64; 2] {
        self.gradients[i * (self.resolution.cols + 1) + j]
    }

    /// Noise inside lattice cell `(cell_r, cell_c)` at fractional offset
    /// `(fr, fc) ∈ [0, 1]²`, scaled by √2.
    #[inline]
    pub(crate) fn blend(&self, cell_r: usize, cell_c: usize, fr: f64, fc: f64, interpolant: Interpolant) -> f64 {
        let g00 = self.gradient(cell_r, cell_c);
        let g10 = self.gradient(cell_r + 1, cell_c);
        let g01 = self.gradient(cell_r, cell_c + 1);
        let g11 = self.gradient(cell_r + 1, cell_c + 1);

        // Ramps: gradient · (sample − corner).
        let n00 = g00[0] * fr + g00[1] * fc;
        let n10 = g10[0] * (fr - 1.0) + g10[1] * fc;
        let n01 = g01[0] * fr + g01[1] * (fc - 1.0);
        let n11 = g11[0] * (fr - 1.0) + g11[1] * (fc - 1.0);

        let tr = interpolant.apply(fr);
        let tc = interpolant.apply(fc);
        let n0 = n00 * (1.0 - tr) + tr * n10;
        let n1 = n01 * (1.0 - tr) + tr * n11;
        SQRT_2 * ((1.0 - tc) * n0 + tc * n1)
    }

    /// Continuous noise at lattice coordinates `u ∈ [0, rows]`, `v ∈ [0, cols]`.
    /// Coordinates outside that range are clamped onto it.
    pub fn sample(&self, u: f64, v: f64, interpolant: Interpolant) -> f64 {
        let (cell_r, fr) = split_coordinate(u, self.resolution.rows);
        let (cell_c, fc) = split_coordinate(v, self.resolution.cols);
        self.blend(cell_r, cell_c, fr, fc, interpolant)
    }
}

/// Split a lattice coordinate into (cell index, fraction). The far edge
/// belongs to the last cell with fraction 1.
fn split_coordinate(x: f64, cells: usize) -> (usize, f64) {
    let x = x.clamp(0.0, cells as f64);
    let cell = (x.floor() as usize).min(cells.saturating_sub(1));
    (cell, x - cell as f64)
}
