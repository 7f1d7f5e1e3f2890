//! Connected bright-region ("blob") labeling for 2D intensity grids.
//!
//! Identifies connected bright regions in a grayscale intensity grid and
//! assigns each a unique, stable integer label. The pipeline is:
//!
//! 1. **Thresholding**: binarize the grid against its global mean intensity
//! 2. **Labeling**: partition the mask into 8-connected components via
//!    raster-scan flood fill
//! 3. **Registry**: record per-blob seed and pixel count, derive per-blob
//!    masks on demand
//! 4. **Query**: answer "which blob is near this point" for interactive
//!    hover lookup
//!
//! # Module Organization
//!
//! - **threshold**: global-mean and Otsu binarization
//! - **labeling**: flood-fill connected component labeling
//! - **registry**: per-blob metadata store
//! - **query**: seed-radius point lookup
//! - **image**: conversions between image files and intensity grids
//! - **grid**: grid dimension utilities
//! - **error**: the crate error type
//!
//! All grids are ndarray types: `Array2<f64>` intensities, `Array2<bool>`
//! masks, `Array2<usize>` label maps, all indexed [row, col]. Every
//! structure is produced once by its owning operation and read-only
//! afterward; the crate is fully synchronous and holds no state between
//! calls.

pub mod error;
pub mod grid;
pub mod image;
pub mod labeling;
pub mod query;
pub mod registry;
pub mod threshold;

// Re-export key functionality for easier access
pub use error::BlobError;
pub use grid::GridShape;
pub use labeling::label_blobs;
pub use query::{nearest_blob, DEFAULT_QUERY_RADIUS};
pub use registry::{Blob, BlobRegistry};
pub use threshold::{binarize, binarize_at, mean_threshold, otsu_threshold};

use ndarray::ArrayView2;

/// Run the full detection pipeline on an intensity grid.
///
/// Binarizes the grid against its global mean, labels the 8-connected
/// foreground components, and collects them into a registry.
///
/// # Arguments
/// * `grid` - Input intensity grid
///
/// # Returns
/// Registry of detected blobs, or [`BlobError::EmptyGrid`] for a
/// zero-dimension grid. A grid with no pixels above its mean (uniform
/// intensity, for instance) yields an empty registry, not an error.
pub fn detect_blobs(grid: &ArrayView2<f64>) -> Result<BlobRegistry, BlobError> {
    let mask = threshold::binarize(grid)?;
    let registry = BlobRegistry::from_mask(&mask.view());
    log::debug!(
        "labeled {} blob(s) in {} grid",
        registry.count(),
        registry.shape()
    );
    Ok(registry)
}
