//! Environment orchestrator: thickness field → populated reflectivity cube.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{EnvironmentConfig, FieldConfig};
use crate::error::Result;
use crate::field::ThicknessField;
use crate::noise::fractal;
use crate::reflectivity::{populate, PopulatedEnvironment, ReflectivityDataset};
use crate::rings;
use crate::thickness::synthesize;

/// One training sample: the thickness labels and the reflectivity cube
/// drawn for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub seed: u64,
    pub thickness: ThicknessField,
    pub populated: PopulatedEnvironment,
}

pub struct EnvironmentGenerator;

impl EnvironmentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the thickness field described by `config`.
    pub fn thickness_field<R: Rng + ?Sized>(&self, config: &EnvironmentConfig, rng: &mut R) -> Result<ThicknessField> {
        match &config.field {
            FieldConfig::Fractal(cfg) => {
                let noise = fractal::generate(cfg.shape, &cfg.noise, rng)?;
                synthesize(&noise, &cfg.thickness)
            }
            FieldConfig::Rings(params) => rings::generate(params),
        }
    }

    /// Generate one environment from a seed.
    ///
    /// The field consumes the seeded stream first, then population continues
    /// on the same stream.
    pub fn generate(&self, config: &EnvironmentConfig, dataset: &ReflectivityDataset, seed: u64) -> Result<Environment> {
        let mut rng = StdRng::seed_from_u64(seed);
        let thickness = self.thickness_field(config, &mut rng)?;
        let populated = populate(&thickness, dataset, &mut rng)?;
        Ok(Environment { seed, thickness, populated })
    }

    /// Generate `count` environments seeded `base_seed`, `base_seed + 1`, ….
    ///
    /// Each environment owns its generator, so the output is the same with or
    /// without the `threading` feature. The first failure is returned.
    pub fn generate_batch(
        &self,
        config: &EnvironmentConfig,
        dataset: &ReflectivityDataset,
        base_seed: u64,
        count: usize,
    ) -> Result<Vec<Environment>> {
        config.validate()?;
        let seeds: Vec<u64> = (0..count as u64).map(|i| base_seed.wrapping_add(i)).collect();

        #[cfg(feature = "threading")]
        let envs = {
            use rayon::prelude::*;
            seeds
                .par_iter()
                .map(|&seed| self.generate(config, dataset, seed))
                .collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "threading"))]
        let envs = seeds
            .iter()
            .map(|&seed| self.generate(config, dataset, seed))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count, base_seed, shape = %config.shape(), "generated environment batch");
        Ok(envs)
    }
}

impl Default for EnvironmentGenerator {
    fn default() -> Self {
        Self::new()
    }
}
