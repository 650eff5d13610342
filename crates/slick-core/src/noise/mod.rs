//! Gradient-noise synthesis over integer grids.
//!
//! A [`GradientLattice`] of unit vectors is expanded to pixel resolution by
//! [`perlin::generate`]; [`fractal::generate`] sums several such octaves at
//! growing frequency and shrinking amplitude.
pub mod fractal;
pub mod interpolant;
pub mod lattice;
pub mod params;
pub mod perlin;

pub use interpolant::Interpolant;
pub use lattice::GradientLattice;
pub use params::FractalParams;
