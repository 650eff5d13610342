//! Procedural oil-film thickness fields and reflectivity population.
//!
//! The pipeline runs leaves first:
//!   gradient lattice → Perlin octave → fractal sum → integer thickness map
//!   → per-cell reflectivity sampling.
//!
//! Concentric-ring fields are an alternative, deterministic source of
//! thickness maps. Every random draw goes through a caller-supplied `Rng`.

pub mod config;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod reflectivity;
pub mod rings;
pub mod stats;
pub mod thickness;

pub use config::{EnvironmentConfig, FieldConfig, FractalFieldConfig};
pub use error::{Result, SlickError};
pub use field::{NoiseField, ThicknessField};
pub use generator::{Environment, EnvironmentGenerator};
pub use grid::{Resolution, Shape, Tileable};
pub use reflectivity::{populate, PopulatedEnvironment, ReflectivityDataset};
pub use stats::{band_statistics, BandStatistics};
