//! Fractal noise: a sum of Perlin octaves.
//!
//! Octave `i` uses resolution `resolution × lacunarity^i` and amplitude
//! `persistence^i`. The result is not clamped; its magnitude is bounded by
//! `√2 · Σ persistence^i`.
use rand::Rng;

use super::params::FractalParams;
use super::perlin;
use crate::error::{Result, SlickError};
use crate::field::NoiseField;
use crate::grid::{Resolution, Shape};

/// Generate fractal noise over `shape`.
///
/// Every octave resolution is validated against `shape` before the first
/// lattice is drawn, so a configuration error leaves `rng` untouched.
pub fn generate<R: Rng + ?Sized>(shape: Shape, params: &FractalParams, rng: &mut R) -> Result<NoiseField> {
    let resolutions = octave_resolutions(shape, params)?;

    let mut noise = NoiseField::new(shape, 0.0);
    let mut amplitude = 1.0f64;
    for resolution in resolutions {
        let octave = perlin::generate(shape, resolution, params.tileable, params.interpolant, rng)?;
        for (acc, v) in noise.data.iter_mut().zip(&octave.data) {
            *acc += amplitude * v;
        }
        amplitude *= params.persistence;
    }

    tracing::debug!(
        %shape,
        resolution = %params.resolution,
        octaves = params.octaves,
        "generated fractal noise"
    );
    Ok(noise)
}

/// Resolutions of every octave, each checked to divide `shape` exactly.
pub fn octave_resolutions(shape: Shape, params: &FractalParams) -> Result<Vec<Resolution>> {
    if params.octaves == 0 {
        return Err(SlickError::InvalidConfig("fractal noise needs at least one octave".into()));
    }
    if params.lacunarity == 0 {
        return Err(SlickError::InvalidConfig("lacunarity must be positive".into()));
    }
    (0..params.octaves)
        .map(|i| {
            let resolution = params.octave_resolution(i).ok_or_else(|| {
                SlickError::InvalidConfig(format!("octave {i} resolution overflows"))
            })?;
            match resolution.cell_size(shape) {
                Some(_) => Ok(resolution),
                None => Err(SlickError::ShapeMismatch { shape, resolution }),
            }
        })
        .collect()
}
