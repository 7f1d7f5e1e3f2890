//! Global thresholding of intensity grids into binary foreground masks.
//!
//! Converts a grayscale intensity grid into a boolean mask using a single
//! global statistic. The default statistic is the arithmetic mean of the
//! whole grid with a strictly-greater-than foreground rule, so a grid of
//! identical intensities produces an all-background mask rather than an
//! error. Otsu's method is available as an alternative global statistic
//! for bimodal intensity distributions.

use crate::error::BlobError;
use crate::grid::GridShape;
use ndarray::{Array2, ArrayView2};

fn require_non_empty(grid: &ArrayView2<f64>) -> Result<GridShape, BlobError> {
    let shape = GridShape::from_dim(grid.dim());
    if shape.is_empty() {
        return Err(BlobError::EmptyGrid { shape });
    }
    Ok(shape)
}

/// Compute the arithmetic mean of all intensities in the grid.
///
/// # Arguments
/// * `grid` - Input intensity grid
///
/// # Returns
/// Mean intensity, or [`BlobError::EmptyGrid`] if either dimension is zero
pub fn mean_threshold(grid: &ArrayView2<f64>) -> Result<f64, BlobError> {
    require_non_empty(grid)?;
    Ok(grid.sum() / grid.len() as f64)
}

/// Apply an explicit threshold to create a binary foreground mask.
///
/// A pixel is foreground if and only if its intensity is strictly greater
/// than `threshold`. Deterministic, single pass, allocates only the mask.
///
/// # Arguments
/// * `grid` - Input intensity grid
/// * `threshold` - Intensity cutoff (same units as the grid)
///
/// # Returns
/// Boolean mask with the same dimensions as the grid
pub fn binarize_at(grid: &ArrayView2<f64>, threshold: f64) -> Result<Array2<bool>, BlobError> {
    require_non_empty(grid)?;
    Ok(grid.mapv(|intensity| intensity > threshold))
}

/// Binarize a grid against its own global mean intensity.
///
/// Equivalent to `binarize_at(grid, mean_threshold(grid)?)`. Because the
/// foreground rule is strict, a uniform grid yields an all-false mask.
///
/// # Arguments
/// * `grid` - Input intensity grid
///
/// # Returns
/// Boolean mask, or [`BlobError::EmptyGrid`] for a zero-dimension grid
pub fn binarize(grid: &ArrayView2<f64>) -> Result<Array2<bool>, BlobError> {
    let threshold = mean_threshold(grid)?;
    binarize_at(grid, threshold)
}

/// Compute a global threshold using Otsu's method.
///
/// Finds the cutoff that maximizes between-class variance over a 256-bin
/// histogram of the grid's own intensity range, separating bright objects
/// from background in bimodal images.
///
/// # Arguments
/// * `grid` - Input intensity grid
///
/// # Returns
/// Threshold in the same units as the grid. A uniform grid returns the
/// uniform value itself; the strict foreground rule downstream then
/// produces an empty mask.
pub fn otsu_threshold(grid: &ArrayView2<f64>) -> Result<f64, BlobError> {
    require_non_empty(grid)?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &intensity in grid.iter() {
        min = min.min(intensity);
        max = max.max(intensity);
    }
    let range = max - min;
    if range <= 0.0 {
        return Ok(min);
    }

    // Histogram over the grid's own dynamic range
    let mut histogram = [0usize; 256];
    let total_pixels = grid.len() as f64;
    for &intensity in grid.iter() {
        let bin = (((intensity - min) / range) * 255.0) as usize;
        histogram[bin.min(255)] += 1;
    }

    let mut sum = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum += i as f64 * count as f64;
    }

    let mut sum_b = 0.0;
    let mut weight_b = 0.0;
    let mut max_variance = 0.0;
    let mut threshold_bin = 0.0;

    for (i, &count) in histogram.iter().enumerate() {
        weight_b += count as f64;
        if weight_b.abs() < f64::EPSILON {
            continue;
        }

        let weight_f = total_pixels - weight_b;
        if weight_f.abs() < f64::EPSILON {
            break;
        }

        sum_b += (i as f64) * (count as f64);
        let mean_b = sum_b / weight_b;
        let mean_f = (sum - sum_b) / weight_f;

        let variance = weight_b * weight_f * (mean_b - mean_f).powi(2);
        if variance > max_variance {
            max_variance = variance;
            threshold_bin = i as f64;
        }
    }

    Ok(min + (threshold_bin / 255.0) * range)
}
