//! Concentric-ring thickness fields.
//!
//! Nested filled discs around the field centre, thickest in the middle. Rings
//! are painted outermost first and each later, smaller disc overwrites the
//! cells it covers, so the result is the last disc containing each cell.
//! Deterministic: identical parameters give identical fields.
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlickError};
use crate::field::ThicknessField;
use crate::grid::Shape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingParams {
    /// Side length of the square field.
    pub size: usize,
    /// Fraction of `size` the radius shrinks by per ring (truncated to whole cells).
    pub radius_step_size: f64,
    pub smallest_thickness: u32,
    pub largest_thickness: u32,
    /// Thickness increment per ring.
    pub step_size: u32,
    /// Fill cells outside every ring with `smallest_thickness` instead of
    /// [`ThicknessField::EMPTY`].
    pub fill_with_smallest_thickness: bool,
    /// Paint rings whose radius has shrunk below zero as discs of `|radius|`,
    /// so the innermost rings grow again.
    pub regrow_negative_radius: bool,
}

impl RingParams {
    /// Base-fill rule of the older generator: fill with the smallest
    /// thickness only when it equals 1.
    pub fn with_legacy_fill(mut self) -> Self {
        self.fill_with_smallest_thickness = self.smallest_thickness == 1;
        self
    }

    /// Radius rule of the older generator, which squared negative radii
    /// instead of dropping those rings.
    pub fn with_legacy_radius(mut self) -> Self {
        self.regrow_negative_radius = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SlickError::InvalidConfig("ring field size must be positive".into()));
        }
        if self.step_size == 0 {
            return Err(SlickError::InvalidConfig("ring thickness step must be positive".into()));
        }
        if !self.radius_step_size.is_finite() || self.radius_step_size < 0.0 {
            return Err(SlickError::InvalidConfig(format!(
                "radius step {} must be a non-negative fraction",
                self.radius_step_size
            )));
        }
        if self.smallest_thickness > self.largest_thickness {
            return Err(SlickError::InvalidThicknessRange {
                smallest: self.smallest_thickness,
                largest: self.largest_thickness,
            });
        }
        Ok(())
    }

    /// Radius decrement between consecutive rings, in cells.
    pub fn radius_decrement(&self) -> i64 {
        (self.radius_step_size * self.size as f64) as i64
    }
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            size: 500,
            radius_step_size: 0.04,
            smallest_thickness: 0,
            largest_thickness: 10,
            step_size: 1,
            fill_with_smallest_thickness: false,
            regrow_negative_radius: false,
        }
    }
}

/// Generate a `size × size` concentric-ring thickness field.
///
/// The outermost ring has radius `size / 2` and `smallest_thickness`; each
/// following ring shrinks by [`RingParams::radius_decrement`] and gains
/// `step_size`, until the thickness would exceed `largest_thickness`. A ring
/// whose radius has dropped to zero or below covers no cells, unless
/// [`RingParams::regrow_negative_radius`] is set.
pub fn generate(params: &RingParams) -> Result<ThicknessField> {
    params.validate()?;

    let base = if params.fill_with_smallest_thickness {
        params.smallest_thickness
    } else {
        ThicknessField::EMPTY
    };
    let mut field = ThicknessField::new(Shape::square(params.size), base);

    let center = (params.size / 2) as i64;
    let shrink = params.radius_decrement();
    // A disc this wide already covers the whole field.
    let max_reach = 2 * params.size as u64;
    let mut radius = center;
    let mut thickness = params.smallest_thickness;
    let mut rings = 0usize;
    loop {
        let reach = if radius > 0 || params.regrow_negative_radius {
            radius.unsigned_abs().min(max_reach) as i64
        } else {
            0
        };
        if reach > 0 {
            fill_disc(&mut field, center, reach, thickness);
        }
        rings += 1;
        radius = radius.saturating_sub(shrink);
        thickness = match thickness.checked_add(params.step_size) {
            Some(t) if t <= params.largest_thickness => t,
            _ => break,
        };
    }

    tracing::debug!(size = params.size, rings, "generated ring field");
    Ok(field)
}

/// Overwrite every cell strictly inside `radius` of `(center, center)`.
fn fill_disc(field: &mut ThicknessField, center: i64, radius: i64, value: u32) {
    let n = field.shape.height as i64;
    let r2 = radius * radius;
    let lo = (center - radius).max(0);
    let hi = (center + radius).min(n - 1);
    for x in lo..=hi {
        let dx = x - center;
        for y in lo..=hi {
            let dy = y - center;
            if dx * dx + dy * dy < r2 {
                field.set(x as usize, y as usize, value);
            }
        }
    }
}
