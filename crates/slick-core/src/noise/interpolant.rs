//! Blending curves for gradient-noise interpolation.
use serde::{Deserialize, Serialize};

/// Quintic smoothstep `t³(6t² − 15t + 10)`.
///
/// First and second derivatives vanish at `t = 0` and `t = 1`, so adjacent
/// lattice cells join without visible seams.
#[inline]
pub fn quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Septic smootherstep `−20t⁷ + 70t⁶ − 84t⁵ + 35t⁴`.
///
/// Its derivative is `140t³(1 − t)³`, so first, second and third derivatives
/// all vanish at both endpoints.
#[inline]
pub fn septic(t: f64) -> f64 {
    let t2 = t * t;
    t2 * t2 * (35.0 + t * (-84.0 + t * (70.0 - 20.0 * t)))
}

/// Selectable interpolant, kept as data so it can live in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolant {
    #[default]
    Quintic,
    Septic,
}

impl Interpolant {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Interpolant::Quintic => quintic(t),
            Interpolant::Septic => septic(t),
        }
    }
}
