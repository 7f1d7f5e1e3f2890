//! Grid dimensions and point containment utilities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid dimensions structure
///
/// Represents the width and height of an intensity grid, mask, or label map.
/// Uses usize for direct compatibility with ndarray indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Grid width in pixels
    pub width: usize,
    /// Grid height in pixels
    pub height: usize,
}

impl GridShape {
    /// Create a new GridShape
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Create from an ndarray dimension tuple, which is (rows, cols)
    pub fn from_dim(dim: (usize, usize)) -> Self {
        Self {
            width: dim.1,
            height: dim.0,
        }
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert to an ndarray dimension tuple (rows, cols)
    pub fn to_dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Check if an integer point is within bounds
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Check if a float point is within bounds
    pub fn contains_f64(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
