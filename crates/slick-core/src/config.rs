//! Serializable experiment configuration.
//!
//! Defaults reproduce the reference experiment: a 300×300 single-octave
//! fractal field at resolution 2×2 mapped onto thickness 1–10, or a 500-cell
//! ring field spanning thickness 0–10.
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::Shape;
use crate::noise::{fractal, FractalParams};
use crate::rings::RingParams;
use crate::thickness::ThicknessParams;

/// Fractal noise rescaled to integer thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalFieldConfig {
    pub shape: Shape,
    pub noise: FractalParams,
    pub thickness: ThicknessParams,
}

impl Default for FractalFieldConfig {
    fn default() -> Self {
        Self {
            shape: Shape::square(300),
            noise: FractalParams::default(),
            thickness: ThicknessParams::default(),
        }
    }
}

/// Source of the thickness field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
    Fractal(FractalFieldConfig),
    Rings(RingParams),
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig::Fractal(FractalFieldConfig::default())
    }
}

/// Everything needed to build one environment, minus the dataset and seed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub field: FieldConfig,
}

impl EnvironmentConfig {
    /// Check every parameter without generating anything.
    pub fn validate(&self) -> Result<()> {
        match &self.field {
            FieldConfig::Fractal(cfg) => {
                fractal::octave_resolutions(cfg.shape, &cfg.noise)?;
                cfg.thickness.validate()
            }
            FieldConfig::Rings(params) => params.validate(),
        }
    }

    pub fn shape(&self) -> Shape {
        match &self.field {
            FieldConfig::Fractal(cfg) => cfg.shape,
            FieldConfig::Rings(params) => Shape::square(params.size),
        }
    }
}
