//! Image format conversion and loading for intensity grids.
//!
//! Bridges the image crate types (used for file I/O and display) and the
//! ndarray structures the detection core operates on. Loading discards any
//! transparency channel and reduces color to a single intensity as the mean
//! of the three color channels.
//!
//! # Coordinate System Conversions
//!
//! - **ndarray**: matrix indexing [row, col] = [y, x] with (height, width) dimensions
//! - **image crate**: graphics indexing (x, y) with (width, height) dimensions

use crate::error::BlobError;
use crate::grid::GridShape;
use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use ndarray::Array2;
use std::error::Error;
use std::path::Path;

/// Brightness added to a blob's pixels by [`highlight_blob`].
const HIGHLIGHT_GAIN: u8 = 80;

/// Reduce an RGB image to a per-pixel intensity grid.
///
/// Intensity is the arithmetic mean of the red, green, and blue channels.
/// Any alpha channel was already discarded by the RGB conversion upstream.
///
/// # Arguments
/// * `img` - Source RGB image
///
/// # Returns
/// `Array2<f64>` of shape (height, width) with intensities in [0, 255]
pub fn rgb_to_intensity(img: &RgbImage) -> Array2<f64> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let pixel = img.get_pixel(x as u32, y as u32);
        (pixel[0] as f64 + pixel[1] as f64 + pixel[2] as f64) / 3.0
    })
}

/// Load an image file as an intensity grid.
///
/// Decodes any format the image crate supports, converts to 8-bit RGB
/// (dropping transparency), and reduces to intensities via
/// [`rgb_to_intensity`].
///
/// # Arguments
/// * `path` - Path to the source image (PNG, JPEG, TIFF, ...)
///
/// # Returns
/// Intensity grid, or the decoding error
pub fn load_intensity_grid<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, Box<dyn Error>> {
    let img = image::open(path)?.to_rgb8();
    Ok(rgb_to_intensity(&img))
}

/// Convert a grayscale image to an intensity grid.
pub fn gray_image_to_array2(img: &GrayImage) -> Array2<f64> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32)[0] as f64
    })
}

/// Convert an `Array2<u8>` to a GrayImage for saving or display.
///
/// Maps array index [row, col] to image pixel (col, row) so orientation is
/// preserved.
pub fn array2_to_gray_image(arr: &Array2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut img = GrayImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x as u32, y as u32, Luma([arr[[y, x]]]));
        }
    }

    img
}

/// Render a label map as an auto-scaled 8-bit grayscale array.
///
/// Background stays 0; labels 1..=N are spread linearly so the highest
/// label maps to 255. A map with no foreground renders all black.
///
/// # Arguments
/// * `label_map` - Label map from the labeler
///
/// # Returns
/// `Array2<u8>` suitable for [`array2_to_gray_image`] or [`save_gray_image`]
pub fn label_map_to_gray(label_map: &Array2<usize>) -> Array2<u8> {
    let max_label = label_map.iter().copied().max().unwrap_or(0);
    if max_label == 0 {
        return Array2::zeros(label_map.dim());
    }
    label_map.mapv(|label| ((label * 255) / max_label) as u8)
}

/// Brighten one blob's pixels for hover display.
///
/// Returns a copy of `base` with every masked pixel lifted by a fixed gain
/// (saturating at 255). The mask normally comes from
/// [`crate::registry::BlobRegistry::mask_for`].
///
/// # Arguments
/// * `base` - 8-bit grayscale rendering of the scene
/// * `mask` - Per-blob mask with the same dimensions as `base`
///
/// # Returns
/// Highlighted copy, or [`BlobError::DimensionMismatch`] if the mask does
/// not match the base dimensions
pub fn highlight_blob(base: &Array2<u8>, mask: &Array2<bool>) -> Result<Array2<u8>, BlobError> {
    if base.dim() != mask.dim() {
        return Err(BlobError::DimensionMismatch {
            expected: GridShape::from_dim(base.dim()),
            actual: GridShape::from_dim(mask.dim()),
        });
    }

    let mut highlighted = base.clone();
    for ((y, x), &selected) in mask.indexed_iter() {
        if selected {
            highlighted[[y, x]] = highlighted[[y, x]].saturating_add(HIGHLIGHT_GAIN);
        }
    }
    Ok(highlighted)
}

/// Save an 8-bit grayscale array to a standard image file.
///
/// File format is determined by the path extension (.png, .jpg, .tiff).
pub fn save_gray_image<P: AsRef<Path>>(image: &Array2<u8>, path: P) -> Result<(), Box<dyn Error>> {
    let (height, width) = image.dim();

    let mut img_buffer = ImageBuffer::new(width as u32, height as u32);
    for (x, y, pixel) in img_buffer.enumerate_pixels_mut() {
        *pixel = Luma([image[[y as usize, x as usize]]]);
    }

    img_buffer.save(path)?;
    Ok(())
}
