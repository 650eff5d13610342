use thiserror::Error;

use crate::grid::{Resolution, Shape};

/// Errors raised by field generation and reflectivity population.
///
/// All of them are configuration or data errors: the same inputs fail the
/// same way on every call, so none of them is worth retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SlickError {
    #[error("shape {shape} is not an exact multiple of noise resolution {resolution}")]
    ShapeMismatch { shape: Shape, resolution: Resolution },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("smallest thickness {smallest} exceeds largest thickness {largest}")]
    InvalidThicknessRange { smallest: u32, largest: u32 },

    #[error("thickness {value} does not fit the output width (max {max})")]
    ThicknessOutOfRange { value: u32, max: u32 },

    #[error("no reflectivity samples for thickness {thickness}")]
    MissingThicknessSample { thickness: u32 },

    #[error("thickness {thickness}: spectral vector has {found} bands, expected {expected}")]
    InconsistentBandWidth { thickness: u32, expected: usize, found: usize },

    #[error("reflectivity dataset contains no spectral vectors")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, SlickError>;
