//! Grid extents shared by every field type.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Spatial extent of a 2D field: `height` rows by `width` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
}

impl Shape {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major flat index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.height, self.width)
    }
}

/// Number of noise periods tiled across a [`Shape`] along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub rows: usize,
    pub cols: usize,
}

impl Resolution {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Both axes multiplied by `factor`.
    pub fn scaled(&self, factor: usize) -> Self {
        Self::new(self.rows * factor, self.cols * factor)
    }

    /// Pixels per lattice cell along each axis, or `None` when `shape` is not
    /// an exact positive multiple of this resolution.
    pub fn cell_size(&self, shape: Shape) -> Option<(usize, usize)> {
        if self.rows == 0 || self.cols == 0 || shape.is_empty() {
            return None;
        }
        if shape.height % self.rows != 0 || shape.width % self.cols != 0 {
            return None;
        }
        Some((shape.height / self.rows, shape.width / self.cols))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}

/// Per-axis wrap flags. A tileable axis produces noise whose opposite edges
/// meet seamlessly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tileable {
    pub rows: bool,
    pub cols: bool,
}

impl Tileable {
    pub const NONE: Self = Self { rows: false, cols: false };
    pub const BOTH: Self = Self { rows: true, cols: true };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_requires_exact_multiple() {
        let res = Resolution::new(2, 4);
        assert_eq!(res.cell_size(Shape::new(64, 64)), Some((32, 16)));
        assert_eq!(res.cell_size(Shape::new(63, 64)), None);
        assert_eq!(res.cell_size(Shape::new(64, 66)), None);
    }

    #[test]
    fn cell_size_rejects_zero_extents() {
        assert_eq!(Resolution::new(0, 2).cell_size(Shape::new(8, 8)), None);
        assert_eq!(Resolution::new(2, 2).cell_size(Shape::new(0, 8)), None);
    }
}
