//! Per-cell reflectivity sampling over a thickness field.
//!
//! Each cell receives one spectral vector drawn uniformly from the samples
//! measured (or simulated) at that cell's thickness.
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlickError};
use crate::field::ThicknessField;
use crate::grid::Shape;

/// Thickness label → spectral vectors, one reflectivity value per band.
///
/// Every vector in the dataset has the same band count. A thickness whose
/// collection is empty behaves as if it were absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct ReflectivityDataset {
    samples: BTreeMap<u32, Vec<Vec<f64>>>,
    #[serde(skip_serializing)]
    num_bands: usize,
}

#[derive(Deserialize)]
struct RawDataset {
    samples: BTreeMap<u32, Vec<Vec<f64>>>,
}

impl TryFrom<RawDataset> for ReflectivityDataset {
    type Error = SlickError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Self::new(raw.samples)
    }
}

impl ReflectivityDataset {
    /// Validate band widths and infer the band count.
    pub fn new(samples: BTreeMap<u32, Vec<Vec<f64>>>) -> Result<Self> {
        let mut num_bands: Option<usize> = None;
        for (&thickness, vectors) in &samples {
            for v in vectors {
                match num_bands {
                    None if v.is_empty() => {
                        return Err(SlickError::InvalidConfig(format!(
                            "thickness {thickness}: spectral vector has no bands"
                        )));
                    }
                    None => num_bands = Some(v.len()),
                    Some(expected) if expected != v.len() => {
                        return Err(SlickError::InconsistentBandWidth {
                            thickness,
                            expected,
                            found: v.len(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        let num_bands = num_bands.ok_or(SlickError::EmptyDataset)?;
        Ok(Self { samples, num_bands })
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Thickness labels that have at least one sample, ascending.
    pub fn thicknesses(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(&t, _)| t)
    }

    pub fn samples(&self, thickness: u32) -> Option<&[Vec<f64>]> {
        self.samples
            .get(&thickness)
            .map(Vec::as_slice)
            .filter(|v| !v.is_empty())
    }

    /// Fail on the smallest thickness in `field` that has no samples.
    pub fn check_coverage(&self, field: &ThicknessField) -> Result<()> {
        match field
            .distinct_values()
            .into_iter()
            .find(|&t| self.samples(t).is_none())
        {
            Some(thickness) => Err(SlickError::MissingThicknessSample { thickness }),
            None => Ok(()),
        }
    }
}

/// A `height × width × num_bands` reflectivity cube, row-major with bands
/// innermost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvironment")]
pub struct PopulatedEnvironment {
    pub data: Vec<f64>,
    pub shape: Shape,
    pub num_bands: usize,
}

#[derive(Deserialize)]
struct RawEnvironment {
    data: Vec<f64>,
    shape: Shape,
    num_bands: usize,
}

impl TryFrom<RawEnvironment> for PopulatedEnvironment {
    type Error = SlickError;

    fn try_from(raw: RawEnvironment) -> Result<Self> {
        if raw.num_bands == 0 {
            return Err(SlickError::InvalidConfig(
                "reflectivity cube has no bands".into(),
            ));
        }
        let expected = raw
            .shape
            .height
            .checked_mul(raw.shape.width)
            .and_then(|cells| cells.checked_mul(raw.num_bands));
        if expected != Some(raw.data.len()) {
            return Err(SlickError::InvalidConfig(format!(
                "reflectivity cube of shape {} with {} bands has {} values",
                raw.shape,
                raw.num_bands,
                raw.data.len()
            )));
        }
        Ok(Self { data: raw.data, shape: raw.shape, num_bands: raw.num_bands })
    }
}

impl PopulatedEnvironment {
    /// Spectral vector at `(row, col)`.
    #[inline]
    pub fn spectrum(&self, row: usize, col: usize) -> &[f64] {
        let start = self.shape.index(row, col) * self.num_bands;
        &self.data[start..start + self.num_bands]
    }

    /// One band as a row-major 2D plane, or `None` past the last band.
    pub fn band(&self, band: usize) -> Option<Vec<f64>> {
        if band >= self.num_bands {
            return None;
        }
        Some(
            self.data
                .chunks_exact(self.num_bands)
                .map(|s| s[band])
                .collect(),
        )
    }
}

/// Draw one spectral vector per cell of `field`.
///
/// Coverage is checked for every distinct thickness first, so a missing
/// thickness fails before any sampling happens.
pub fn populate<R: Rng + ?Sized>(
    field: &ThicknessField,
    dataset: &ReflectivityDataset,
    rng: &mut R,
) -> Result<PopulatedEnvironment> {
    dataset.check_coverage(field)?;

    let num_bands = dataset.num_bands();
    let mut data = Vec::with_capacity(field.data.len() * num_bands);
    for &thickness in &field.data {
        let spectrum = dataset
            .samples(thickness)
            .and_then(|candidates| candidates.choose(&mut *rng))
            .ok_or(SlickError::MissingThicknessSample { thickness })?;
        data.extend_from_slice(spectrum);
    }

    tracing::debug!(shape = %field.shape, num_bands, "populated reflectivity cube");
    Ok(PopulatedEnvironment { data, shape: field.shape, num_bands })
}
