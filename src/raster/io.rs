//! Convenience helpers for loading binary rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Grayscale pixels are
//! thresholded into foreground/background; `ink_below` flips the polarity
//! for dark-ink-on-light scans.

use crate::raster::OwnedRaster;
use crate::util::{GlyphSpotError, GlyphSpotResult};
use std::path::Path;

/// Thresholds a grayscale image buffer into a binary raster.
///
/// With `ink_below == false`, pixels `>= threshold` are foreground; with
/// `ink_below == true`, pixels `< threshold` are.
pub fn raster_from_gray_image(
    img: &image::GrayImage,
    threshold: u8,
    ink_below: bool,
) -> GlyphSpotResult<OwnedRaster> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data: Vec<bool> = img
        .as_raw()
        .iter()
        .map(|&v| if ink_below { v < threshold } else { v >= threshold })
        .collect();
    OwnedRaster::from_vec(data, width, height)
}

/// Loads an image from disk and thresholds it into a binary raster.
pub fn load_binary_image<P: AsRef<Path>>(
    path: P,
    threshold: u8,
    ink_below: bool,
) -> GlyphSpotResult<OwnedRaster> {
    let img = image::open(path).map_err(|err| GlyphSpotError::ImageIo {
        reason: err.to_string(),
    })?;
    raster_from_gray_image(&img.to_luma8(), threshold, ink_below)
}
