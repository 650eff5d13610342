//! Single-octave 2D gradient noise on an integer grid.
//!
//! Every output pixel belongs to lattice cell `(i / d_r, j / d_c)` where
//! `d = shape / resolution`, at fractional offset `(i mod d_r) / d_r` inside it.
//! Rows are independent and are filled in parallel with the `threading`
//! feature.
use rand::Rng;

use super::interpolant::Interpolant;
use super::lattice::GradientLattice;
use crate::error::{Result, SlickError};
use crate::field::NoiseField;
use crate::grid::{Resolution, Shape, Tileable};

/// Generate one octave of Perlin noise with a freshly drawn lattice.
///
/// `shape` must be an exact multiple of `resolution` on both axes. The check
/// runs before any randomness is consumed. Values lie within `[-√2, √2]`.
pub fn generate<R: Rng + ?Sized>(
    shape: Shape,
    resolution: Resolution,
    tileable: Tileable,
    interpolant: Interpolant,
    rng: &mut R,
) -> Result<NoiseField> {
    check_shape(shape, resolution)?;
    let lattice = GradientLattice::random(resolution, tileable, rng);
    generate_with_lattice(shape, &lattice, interpolant)
}

/// Generate one octave of Perlin noise over an existing lattice.
pub fn generate_with_lattice(
    shape: Shape,
    lattice: &GradientLattice,
    interpolant: Interpolant,
) -> Result<NoiseField> {
    let resolution = lattice.resolution();
    let (d_r, d_c) = check_shape(shape, resolution)?;

    let fill_row = |r: usize, row: &mut [f64]| {
        let cell_r = r / d_r;
        let fr = (r % d_r) as f64 / d_r as f64;
        for (c, out) in row.iter_mut().enumerate() {
            let cell_c = c / d_c;
            let fc = (c % d_c) as f64 / d_c as f64;
            *out = lattice.blend(cell_r, cell_c, fr, fc, interpolant);
        }
    };

    let mut data = vec![0.0f64; shape.len()];
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(shape.width)
            .enumerate()
            .for_each(|(r, row)| fill_row(r, row));
    }
    #[cfg(not(feature = "threading"))]
    {
        data.chunks_mut(shape.width)
            .enumerate()
            .for_each(|(r, row)| fill_row(r, row));
    }

    tracing::debug!(%shape, %resolution, "generated perlin octave");
    Ok(NoiseField { data, shape })
}

fn check_shape(shape: Shape, resolution: Resolution) -> Result<(usize, usize)> {
    resolution
        .cell_size(shape)
        .ok_or(SlickError::ShapeMismatch { shape, resolution })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::SQRT_2;

    fn perlin(shape: Shape, res: Resolution, tileable: Tileable, seed: u64) -> NoiseField {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(shape, res, tileable, Interpolant::Quintic, &mut rng).unwrap()
    }

    #[test]
    fn output_has_requested_shape() {
        let f = perlin(Shape::new(48, 96), Resolution::new(3, 4), Tileable::NONE, 1);
        assert_eq!(f.shape, Shape::new(48, 96));
        assert_eq!(f.data.len(), 48 * 96);
    }

    #[test]
    fn values_bounded_by_sqrt_two() {
        for seed in 0..8 {
            let f = perlin(Shape::new(64, 64), Resolution::new(4, 2), Tileable::NONE, seed);
            for &v in &f.data {
                assert!(v.abs() <= SQRT_2, "value {v} outside [-√2, √2]");
            }
        }
    }

    #[test]
    fn output_is_not_constant() {
        let f = perlin(Shape::new(64, 64), Resolution::new(2, 2), Tileable::NONE, 5);
        assert!(f.max() - f.min() > 0.1);
    }

    #[test]
    fn same_seed_same_field() {
        let a = perlin(Shape::new(32, 32), Resolution::new(2, 2), Tileable::NONE, 42);
        let b = perlin(Shape::new(32, 32), Resolution::new(2, 2), Tileable::NONE, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn shape_not_multiple_of_resolution_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate(
            Shape::new(30, 32),
            Resolution::new(4, 4),
            Tileable::NONE,
            Interpolant::Quintic,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SlickError::ShapeMismatch { shape: Shape::new(30, 32), resolution: Resolution::new(4, 4) }
        );
    }

    #[test]
    fn grid_matches_continuous_lattice_sampling() {
        let mut rng = StdRng::seed_from_u64(8);
        let res = Resolution::new(2, 3);
        let lattice = GradientLattice::random(res, Tileable::NONE, &mut rng);
        let shape = Shape::new(16, 24);
        let f = generate_with_lattice(shape, &lattice, Interpolant::Quintic).unwrap();
        for r in 0..shape.height {
            for c in 0..shape.width {
                let u = r as f64 / 8.0;
                let v = c as f64 / 8.0;
                assert_abs_diff_eq!(
                    f.get(r, c),
                    lattice.sample(u, v, Interpolant::Quintic),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn tileable_field_first_row_continues_the_far_edge() {
        // Row 0 (column 0) must equal the noise one step past the last
        // row (column), i.e. the lattice sampled on its far edge.
        let mut rng = StdRng::seed_from_u64(13);
        let res = Resolution::new(2, 3);
        let lattice = GradientLattice::random(res, Tileable::BOTH, &mut rng);
        let shape = Shape::new(16, 24);
        for interpolant in [Interpolant::Quintic, Interpolant::Septic] {
            let f = generate_with_lattice(shape, &lattice, interpolant).unwrap();
            for c in 0..shape.width {
                let far = lattice.sample(res.rows as f64, c as f64 / 8.0, interpolant);
                assert_abs_diff_eq!(f.get(0, c), far, epsilon = 1e-12);
            }
            for r in 0..shape.height {
                let far = lattice.sample(r as f64 / 8.0, res.cols as f64, interpolant);
                assert_abs_diff_eq!(f.get(r, 0), far, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn tileable_field_wraps_smoothly() {
        // The jump across the wrap seam must be comparable to an ordinary
        // step between neighbouring rows or columns.
        let f = perlin(Shape::new(64, 64), Resolution::new(2, 2), Tileable::BOTH, 21);
        let n = 64;
        let mut max_step = 0.0f64;
        for r in 0..n {
            for c in 0..n - 1 {
                max_step = max_step.max((f.get(r, c + 1) - f.get(r, c)).abs());
                max_step = max_step.max((f.get(c + 1, r) - f.get(c, r)).abs());
            }
        }
        for k in 0..n {
            let row_seam = (f.get(0, k) - f.get(n - 1, k)).abs();
            let col_seam = (f.get(k, 0) - f.get(k, n - 1)).abs();
            assert!(row_seam <= 2.0 * max_step, "row seam {row_seam} vs step {max_step}");
            assert!(col_seam <= 2.0 * max_step, "col seam {col_seam} vs step {max_step}");
        }
    }

    #[test]
    fn first_row_is_zero_on_lattice_columns() {
        let f = perlin(Shape::new(16, 16), Resolution::new(2, 2), Tileable::NONE, 4);
        for c in [0, 8] {
            assert_abs_diff_eq!(f.get(0, c), 0.0, epsilon = 1e-12);
        }
    }
}
