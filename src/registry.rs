//! Immutable per-blob metadata store built from a labeling pass.
//!
//! A [`BlobRegistry`] owns the label map and the discovery-ordered list of
//! [`Blob`] records produced by the labeler. All operations are pure reads;
//! nothing here mutates the label map after construction.

use crate::error::BlobError;
use crate::grid::GridShape;
use crate::labeling::label_blobs;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// A connected foreground component discovered during labeling.
///
/// Labels are positive, unique, and sequential starting at 1 in discovery
/// order. The seed is the first pixel of the component in raster scan
/// order, which is also its lexicographically smallest (row, col) pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// Component identifier (1-based, discovery order)
    pub label: usize,
    /// Discovery seed as (row, col)
    pub seed: (usize, usize),
    /// Number of pixels in the component
    pub pixel_count: usize,
}

impl Blob {
    /// Seed coordinate in image (x, y) convention: x = column, y = row.
    pub fn seed_xy(&self) -> (f64, f64) {
        (self.seed.1 as f64, self.seed.0 as f64)
    }
}

/// Ordered collection of blobs indexed by label, plus the label map they
/// were derived from.
///
/// Insertion order equals label order equals discovery order, so the blob
/// with label `l` sits at index `l - 1`.
#[derive(Debug, Clone)]
pub struct BlobRegistry {
    label_map: Array2<usize>,
    blobs: Vec<Blob>,
}

impl BlobRegistry {
    /// Label a binary mask and collect the result into a registry.
    pub fn from_mask(mask: &ArrayView2<bool>) -> Self {
        let (label_map, blobs) = label_blobs(mask);
        Self { label_map, blobs }
    }

    /// Wrap an existing labeling result.
    ///
    /// The caller is responsible for the pair being consistent, i.e. the
    /// blobs were produced by labeling this map.
    pub fn from_parts(label_map: Array2<usize>, blobs: Vec<Blob>) -> Self {
        Self { label_map, blobs }
    }

    /// Number of blobs (0 if the mask had no foreground).
    pub fn count(&self) -> usize {
        self.blobs.len()
    }

    /// True if the registry holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Look up a blob by label.
    ///
    /// # Arguments
    /// * `label` - Component identifier in [1, count]
    ///
    /// # Returns
    /// The blob record, or [`BlobError::UnknownLabel`] if the label is out
    /// of range (0 and anything past the last label are both rejected)
    pub fn get(&self, label: usize) -> Result<&Blob, BlobError> {
        if label == 0 || label > self.blobs.len() {
            return Err(BlobError::UnknownLabel {
                label,
                count: self.blobs.len(),
            });
        }
        Ok(&self.blobs[label - 1])
    }

    /// Discovery seed of a blob as (row, col).
    pub fn seed(&self, label: usize) -> Result<(usize, usize), BlobError> {
        Ok(self.get(label)?.seed)
    }

    /// Pixel count of a blob.
    pub fn pixel_count(&self, label: usize) -> Result<usize, BlobError> {
        Ok(self.get(label)?.pixel_count)
    }

    /// Derive a fresh binary mask selecting one blob's pixels.
    ///
    /// A pixel is true if and only if the label map holds `label` at that
    /// position. The stored label map is read, never modified.
    pub fn mask_for(&self, label: usize) -> Result<Array2<bool>, BlobError> {
        self.get(label)?;
        Ok(self.label_map.mapv(|l| l == label))
    }

    /// All blobs in discovery order.
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// The label map the registry was built from.
    pub fn label_map(&self) -> &Array2<usize> {
        &self.label_map
    }

    /// Dimensions of the underlying grid.
    pub fn shape(&self) -> GridShape {
        GridShape::from_dim(self.label_map.dim())
    }
}
