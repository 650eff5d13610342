//! Per-band normalisation statistics over populated environments.
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlickError};
use crate::reflectivity::PopulatedEnvironment;

/// Mean and population standard deviation of every band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// Number of cells contributing to each band.
    pub cells: usize,
}

/// Aggregate every cell of every environment, band by band.
pub fn band_statistics(envs: &[PopulatedEnvironment]) -> Result<BandStatistics> {
    let num_bands = match envs.first() {
        Some(env) => env.num_bands,
        None => return Err(SlickError::InvalidConfig("no environments to summarise".into())),
    };
    if let Some(env) = envs.iter().find(|e| e.num_bands != num_bands) {
        return Err(SlickError::InvalidConfig(format!(
            "environments disagree on band count: {num_bands} vs {}",
            env.num_bands
        )));
    }

    let cells: usize = envs.iter().map(|e| e.shape.len()).sum();
    if cells == 0 {
        return Err(SlickError::InvalidConfig("environments have no cells".into()));
    }

    let mut sum = vec![0.0f64; num_bands];
    for env in envs {
        for spectrum in env.data.chunks_exact(num_bands) {
            for (s, v) in sum.iter_mut().zip(spectrum) {
                *s += v;
            }
        }
    }
    let mean: Vec<f64> = sum.iter().map(|s| s / cells as f64).collect();

    let mut sq = vec![0.0f64; num_bands];
    for env in envs {
        for spectrum in env.data.chunks_exact(num_bands) {
            for ((acc, v), m) in sq.iter_mut().zip(spectrum).zip(&mean) {
                *acc += (v - m).powi(2);
            }
        }
    }
    let std = sq.iter().map(|s| (s / cells as f64).sqrt()).collect();

    Ok(BandStatistics { mean, std, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Shape;
    use approx::assert_abs_diff_eq;

    fn env(values: &[[f64; 2]]) -> PopulatedEnvironment {
        PopulatedEnvironment {
            data: values.iter().flatten().copied().collect(),
            shape: Shape::new(1, values.len()),
            num_bands: 2,
        }
    }

    #[test]
    fn statistics_across_environments() {
        let a = env(&[[1.0, 10.0], [3.0, 10.0]]);
        let b = env(&[[5.0, 10.0], [7.0, 10.0]]);
        let s = band_statistics(&[a, b]).unwrap();
        assert_eq!(s.cells, 4);
        assert_abs_diff_eq!(s.mean[0], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.mean[1], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std[0], 5.0f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.std[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(band_statistics(&[]).is_err());
    }

    #[test]
    fn mixed_band_counts_rejected() {
        let a = env(&[[1.0, 2.0]]);
        let b = PopulatedEnvironment { data: vec![1.0], shape: Shape::new(1, 1), num_bands: 1 };
        assert!(band_statistics(&[a, b]).is_err());
    }
}
