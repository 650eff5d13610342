use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlickError};
use crate::grid::Shape;

/// A 2D field of real noise values, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField<f64>")]
pub struct NoiseField {
    pub data: Vec<f64>,
    pub shape: Shape,
}

/// Wire form shared by both field types; checked against `shape` on load.
#[derive(Deserialize)]
struct RawField<T> {
    data: Vec<T>,
    shape: Shape,
}

impl<T> RawField<T> {
    fn checked(self) -> Result<(Vec<T>, Shape)> {
        let cells = self.shape.height.checked_mul(self.shape.width);
        if cells != Some(self.data.len()) {
            return Err(SlickError::InvalidConfig(format!(
                "field of shape {} has {} values",
                self.shape,
                self.data.len()
            )));
        }
        Ok((self.data, self.shape))
    }
}

impl TryFrom<RawField<f64>> for NoiseField {
    type Error = SlickError;

    fn try_from(raw: RawField<f64>) -> Result<Self> {
        let (data, shape) = raw.checked()?;
        Ok(Self { data, shape })
    }
}

impl NoiseField {
    /// Create a new NoiseField filled with the given value.
    pub fn new(shape: Shape, fill: f64) -> Self {
        Self { data: vec![fill; shape.len()], shape }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.shape.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f64) {
        let idx = self.shape.index(row, col);
        self.data[idx] = val;
    }

    pub fn min(&self) -> f64 {
        self.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// A 2D map of integer thickness labels, row-major.
///
/// Values lie in the generator's `[smallest, largest]` range, except for
/// [`ThicknessField::EMPTY`] background cells left by ring fields that are not
/// base-filled with the smallest thickness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField<u32>")]
pub struct ThicknessField {
    pub data: Vec<u32>,
    pub shape: Shape,
}

impl TryFrom<RawField<u32>> for ThicknessField {
    type Error = SlickError;

    fn try_from(raw: RawField<u32>) -> Result<Self> {
        let (data, shape) = raw.checked()?;
        Ok(Self { data, shape })
    }
}

impl ThicknessField {
    /// Background label for cells outside every ring.
    pub const EMPTY: u32 = 0;

    pub fn new(shape: Shape, fill: u32) -> Self {
        Self { data: vec![fill; shape.len()], shape }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[self.shape.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: u32) {
        let idx = self.shape.index(row, col);
        self.data[idx] = val;
    }

    /// Sorted, deduplicated thickness values present in the field.
    pub fn distinct_values(&self) -> Vec<u32> {
        self.histogram().into_keys().collect()
    }

    /// Cell count per thickness value.
    pub fn histogram(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for &v in &self.data {
            *counts.entry(v).or_insert(0) += 1;
        }
        counts
    }

    pub fn min_thickness(&self) -> Option<u32> {
        self.data.iter().copied().min()
    }

    pub fn max_thickness(&self) -> Option<u32> {
        self.data.iter().copied().max()
    }

    /// Narrow copy of the field. Fails on the first value above `u8::MAX`
    /// rather than wrapping.
    pub fn to_u8(&self) -> Result<Vec<u8>> {
        self.data
            .iter()
            .map(|&v| {
                u8::try_from(v).map_err(|_| SlickError::ThicknessOutOfRange {
                    value: v,
                    max: u8::MAX as u32,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_field_min_max() {
        let mut f = NoiseField::new(Shape::new(2, 3), 0.0);
        f.set(0, 2, -1.5);
        f.set(1, 1, 2.25);
        assert_eq!(f.min(), -1.5);
        assert_eq!(f.max(), 2.25);
        assert_eq!(f.get(1, 1), 2.25);
    }

    #[test]
    fn histogram_counts_every_cell() {
        let mut t = ThicknessField::new(Shape::new(3, 3), 1);
        t.set(1, 1, 4);
        t.set(2, 0, 4);
        let h = t.histogram();
        assert_eq!(h.get(&1), Some(&7));
        assert_eq!(h.get(&4), Some(&2));
        assert_eq!(t.distinct_values(), vec![1, 4]);
    }

    #[test]
    fn to_u8_rejects_wide_values() {
        let mut t = ThicknessField::new(Shape::square(2), 3);
        assert_eq!(t.to_u8().unwrap(), vec![3; 4]);
        t.set(0, 1, 300);
        assert_eq!(
            t.to_u8(),
            Err(SlickError::ThicknessOutOfRange { value: 300, max: 255 })
        );
    }

    #[test]
    fn load_rejects_data_shorter_than_shape() {
        let json = r#"{"data":[3],"shape":{"height":2,"width":2}}"#;
        let err = serde_json::from_str::<ThicknessField>(json).unwrap_err();
        assert!(err.to_string().contains("2×2"), "{err}");

        let json = r#"{"data":[0.5],"shape":{"height":2,"width":2}}"#;
        assert!(serde_json::from_str::<NoiseField>(json).is_err());
    }

    #[test]
    fn load_rejects_overflowing_shape() {
        let json = format!(
            r#"{{"data":[],"shape":{{"height":{},"width":2}}}}"#,
            usize::MAX
        );
        assert!(serde_json::from_str::<ThicknessField>(&json).is_err());
    }

    #[test]
    fn load_accepts_consistent_field() {
        let t = ThicknessField::new(Shape::new(2, 3), 4);
        let json = serde_json::to_string(&t).unwrap();
        let back: ThicknessField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
