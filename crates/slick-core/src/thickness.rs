//! Noise field → integer thickness map.
//!
//! The field's observed `[min, max]` is mapped linearly onto
//! `[smallest_thickness, largest_thickness]`, rounded, and checked against the
//! requested integer width.
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlickError};
use crate::field::{NoiseField, ThicknessField};

/// How rescaled values are snapped to integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Ties go to the even neighbour.
    #[default]
    NearestEven,
    /// Ties go away from zero.
    NearestAwayFromZero,
}

impl Rounding {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::NearestEven => x.round_ties_even(),
            Rounding::NearestAwayFromZero => x.round(),
        }
    }
}

/// Storage width the thickness labels must fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerWidth {
    /// 8-bit unsigned labels.
    #[default]
    Narrow,
    /// 32-bit unsigned labels.
    Wide,
}

impl IntegerWidth {
    pub fn max_value(self) -> u32 {
        match self {
            IntegerWidth::Narrow => u8::MAX as u32,
            IntegerWidth::Wide => u32::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThicknessParams {
    /// Inclusive lower bound.
    pub smallest_thickness: u32,
    /// Inclusive upper bound.
    pub largest_thickness: u32,
    pub rounding: Rounding,
    pub width: IntegerWidth,
}

impl ThicknessParams {
    pub fn validate(&self) -> Result<()> {
        if self.smallest_thickness > self.largest_thickness {
            return Err(SlickError::InvalidThicknessRange {
                smallest: self.smallest_thickness,
                largest: self.largest_thickness,
            });
        }
        let max = self.width.max_value();
        if self.largest_thickness > max {
            return Err(SlickError::ThicknessOutOfRange { value: self.largest_thickness, max });
        }
        Ok(())
    }
}

impl Default for ThicknessParams {
    fn default() -> Self {
        Self {
            smallest_thickness: 1,
            largest_thickness: 10,
            rounding: Rounding::NearestEven,
            width: IntegerWidth::Narrow,
        }
    }
}

/// Rescale `noise` into an integer thickness map.
///
/// A constant field has no range to stretch: every cell becomes
/// `smallest_thickness` and a warning is logged.
pub fn synthesize(noise: &NoiseField, params: &ThicknessParams) -> Result<ThicknessField> {
    params.validate()?;
    let shape = noise.shape;
    if noise.data.is_empty() {
        return Ok(ThicknessField { data: Vec::new(), shape });
    }

    if noise.data.iter().any(|v| !v.is_finite()) {
        return Err(SlickError::InvalidConfig("noise field contains non-finite values".into()));
    }
    let min_v = noise.min();
    let max_v = noise.max();

    let lo = params.smallest_thickness as f64;
    let hi = params.largest_thickness as f64;
    let range = max_v - min_v;
    if range <= 0.0 {
        tracing::warn!(
            %shape,
            value = min_v,
            fill = params.smallest_thickness,
            "noise field has zero dynamic range, filling with smallest thickness"
        );
        return Ok(ThicknessField::new(shape, params.smallest_thickness));
    }

    let data = noise
        .data
        .iter()
        .map(|&v| {
            let scaled = lo + (v - min_v) * (hi - lo) / range;
            params.rounding.apply(scaled).clamp(lo, hi) as u32
        })
        .collect();
    Ok(ThicknessField { data, shape })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Resolution, Shape};
    use crate::noise::{fractal, FractalParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ramp(values: &[f64]) -> NoiseField {
        NoiseField { data: values.to_vec(), shape: Shape::new(1, values.len()) }
    }

    #[test]
    fn extremes_map_to_bounds() {
        let params = ThicknessParams { smallest_thickness: 2, largest_thickness: 9, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(4);
        let fractal_params = FractalParams { resolution: Resolution::new(4, 4), octaves: 3, ..Default::default() };
        let noise = fractal::generate(Shape::new(64, 64), &fractal_params, &mut rng).unwrap();
        let t = synthesize(&noise, &params).unwrap();
        assert!(t.data.iter().all(|&v| (2..=9).contains(&v)));
        assert_eq!(t.min_thickness(), Some(2));
        assert_eq!(t.max_thickness(), Some(9));
    }

    #[test]
    fn linear_rescale_of_ramp() {
        let params = ThicknessParams { smallest_thickness: 0, largest_thickness: 4, ..Default::default() };
        let t = synthesize(&ramp(&[-1.0, -0.5, 0.0, 0.5, 1.0]), &params).unwrap();
        assert_eq!(t.data, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn rounding_policies_differ_on_ties() {
        // -1 → 0, 0 → 0.5, 1 → 1 on a [0, 1] target.
        let noise = ramp(&[-1.0, 0.0, 1.0]);
        let even = ThicknessParams { smallest_thickness: 0, largest_thickness: 1, ..Default::default() };
        let away = ThicknessParams { rounding: Rounding::NearestAwayFromZero, ..even.clone() };
        assert_eq!(synthesize(&noise, &even).unwrap().data, vec![0, 0, 1]);
        assert_eq!(synthesize(&noise, &away).unwrap().data, vec![0, 1, 1]);
    }

    #[test]
    fn constant_field_fills_with_smallest() {
        let params = ThicknessParams { smallest_thickness: 3, largest_thickness: 7, ..Default::default() };
        let t = synthesize(&NoiseField::new(Shape::new(4, 5), 0.25), &params).unwrap();
        assert_eq!(t.data, vec![3; 20]);
    }

    #[test]
    fn inverted_range_rejected() {
        let params = ThicknessParams { smallest_thickness: 8, largest_thickness: 2, ..Default::default() };
        assert_eq!(
            synthesize(&ramp(&[0.0, 1.0]), &params),
            Err(SlickError::InvalidThicknessRange { smallest: 8, largest: 2 })
        );
    }

    #[test]
    fn narrow_width_rejects_large_bounds() {
        let narrow = ThicknessParams { smallest_thickness: 0, largest_thickness: 300, ..Default::default() };
        assert_eq!(
            synthesize(&ramp(&[0.0, 1.0]), &narrow),
            Err(SlickError::ThicknessOutOfRange { value: 300, max: 255 })
        );
        let wide = ThicknessParams { width: IntegerWidth::Wide, ..narrow };
        assert_eq!(synthesize(&ramp(&[0.0, 1.0]), &wide).unwrap().data, vec![0, 300]);
    }

    #[test]
    fn non_finite_noise_rejected() {
        let params = ThicknessParams::default();
        assert!(matches!(
            synthesize(&ramp(&[0.0, f64::NAN, 1.0]), &params),
            Err(SlickError::InvalidConfig(_))
        ));
        assert!(matches!(
            synthesize(&ramp(&[0.0, f64::INFINITY]), &params),
            Err(SlickError::InvalidConfig(_))
        ));
    }
}
