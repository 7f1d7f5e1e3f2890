use crate::grid::GridShape;
use thiserror::Error;

/// Errors produced by the blob detection pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// Grid has a zero dimension, so there is nothing to threshold.
    #[error("empty grid: {shape} has no pixels")]
    EmptyGrid {
        /// Dimensions of the offending grid.
        shape: GridShape,
    },

    /// Two grids that must share dimensions do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensions the operation expected.
        expected: GridShape,
        /// Dimensions the caller supplied.
        actual: GridShape,
    },

    /// Registry queried with a label outside [1, count].
    #[error("unknown label {label}: registry holds {count} blob(s)")]
    UnknownLabel {
        /// The out-of-range label.
        label: usize,
        /// Number of blobs in the registry.
        count: usize,
    },
}
