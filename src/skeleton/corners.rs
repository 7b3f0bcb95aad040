//! Corner and junction detection on skeleton rasters.
//!
//! A Harris-style response is computed from Sobel gradients with a
//! binomial-smoothed structure tensor. Peaks are strictly positive responses
//! above a fraction of the maximum, thinned by Chebyshev-distance
//! suppression so two seeds are never closer than `min_distance`.

use crate::geom::Point;
use crate::raster::RasterView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Tunable parameters for seed detection.
#[derive(Clone, Copy, Debug)]
pub struct CornerParams {
    /// Harris sensitivity factor in `R = det - k * trace^2`.
    pub k: f32,
    /// Peaks must reach this fraction of the maximum response.
    pub threshold_rel: f32,
    /// Minimum Chebyshev separation between accepted seeds.
    pub min_distance: usize,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            k: 0.05,
            threshold_rel: 0.1,
            min_distance: 2,
        }
    }
}

/// Detects corner/junction seeds on a (padded) skeleton raster.
///
/// Returns seed positions in descending response order after suppression.
/// An empty result means the skeleton has no corner-like structure at all
/// (e.g. a perfectly straight segment), which the pipeline reports as
/// invalid input.
pub fn detect_corners(src: RasterView<'_>, params: &CornerParams) -> Vec<Point> {
    let width = src.width();
    let height = src.height();
    let response = harris_response(src, params.k);

    let mut max_response = 0.0f32;
    for &r in &response {
        if r > max_response {
            max_response = r;
        }
    }
    if max_response <= 0.0 {
        return Vec::new();
    }

    let threshold = max_response * params.threshold_rel;
    let mut candidates: Vec<(f32, Point)> = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let r = response[row * width + col];
            if r > 0.0 && r >= threshold {
                candidates.push((r, Point::new(row as i32, col as i32)));
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| a.1.row.cmp(&b.1.row))
            .then_with(|| a.1.col.cmp(&b.1.col))
    });

    let radius = params.min_distance as i32;
    let mut kept: Vec<Point> = Vec::new();
    'outer: for (_, point) in candidates {
        for seed in &kept {
            if seed.chebyshev(point) <= radius {
                continue 'outer;
            }
        }
        kept.push(point);
    }
    kept
}

/// Computes the Harris corner response for every pixel.
fn harris_response(src: RasterView<'_>, k: f32) -> Vec<f32> {
    let width = src.width();
    let height = src.height();
    let intensity: Vec<f32> = (0..height)
        .flat_map(|row| {
            let slice = src.row(row).unwrap_or(&[]);
            slice.iter().map(|&v| if v { 1.0f32 } else { 0.0f32 })
        })
        .collect();

    let (gx, gy) = sobel_gradients(&intensity, width, height);

    let mut ixx = vec![0.0f32; width * height];
    let mut ixy = vec![0.0f32; width * height];
    let mut iyy = vec![0.0f32; width * height];
    for i in 0..width * height {
        ixx[i] = gx[i] * gx[i];
        ixy[i] = gx[i] * gy[i];
        iyy[i] = gy[i] * gy[i];
    }

    let sxx = smooth_binomial(&ixx, width, height);
    let sxy = smooth_binomial(&ixy, width, height);
    let syy = smooth_binomial(&iyy, width, height);

    let mut response = vec![0.0f32; width * height];
    response_rows(&mut response, &sxx, &sxy, &syy, width, k);
    response
}

#[cfg(feature = "rayon")]
fn response_rows(out: &mut [f32], sxx: &[f32], sxy: &[f32], syy: &[f32], width: usize, k: f32) {
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, chunk)| {
            let base = row * width;
            for (col, value) in chunk.iter_mut().enumerate() {
                *value = harris_formula(sxx[base + col], sxy[base + col], syy[base + col], k);
            }
        });
}

#[cfg(not(feature = "rayon"))]
fn response_rows(out: &mut [f32], sxx: &[f32], sxy: &[f32], syy: &[f32], _width: usize, k: f32) {
    for (i, value) in out.iter_mut().enumerate() {
        *value = harris_formula(sxx[i], sxy[i], syy[i], k);
    }
}

#[inline]
fn harris_formula(sxx: f32, sxy: f32, syy: f32, k: f32) -> f32 {
    let det = sxx * syy - sxy * sxy;
    let trace = sxx + syy;
    det - k * trace * trace
}

/// 3x3 Sobel gradients; border pixels get zero gradient.
fn sobel_gradients(intensity: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let mut gx = vec![0.0f32; width * height];
    let mut gy = vec![0.0f32; width * height];
    if width < 3 || height < 3 {
        return (gx, gy);
    }
    for row in 1..height - 1 {
        for col in 1..width - 1 {
            let at = |r: usize, c: usize| intensity[r * width + c];
            let east = at(row - 1, col + 1) + 2.0 * at(row, col + 1) + at(row + 1, col + 1);
            let west = at(row - 1, col - 1) + 2.0 * at(row, col - 1) + at(row + 1, col - 1);
            let south = at(row + 1, col - 1) + 2.0 * at(row + 1, col) + at(row + 1, col + 1);
            let north = at(row - 1, col - 1) + 2.0 * at(row - 1, col) + at(row - 1, col + 1);
            gx[row * width + col] = east - west;
            gy[row * width + col] = south - north;
        }
    }
    (gx, gy)
}

/// Separable [1, 4, 6, 4, 1]/16 smoothing with clamped borders.
fn smooth_binomial(src: &[f32], width: usize, height: usize) -> Vec<f32> {
    const KERNEL: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

    let mut horizontal = vec![0.0f32; width * height];
    for row in 0..height {
        let base = row * width;
        for col in 0..width {
            let mut acc = 0.0f32;
            for (t, weight) in KERNEL.iter().enumerate() {
                let offset = t as i32 - 2;
                let c = (col as i32 + offset).clamp(0, width as i32 - 1) as usize;
                acc += weight * src[base + c];
            }
            horizontal[base + col] = acc;
        }
    }

    let mut out = vec![0.0f32; width * height];
    for row in 0..height {
        for col in 0..width {
            let mut acc = 0.0f32;
            for (t, weight) in KERNEL.iter().enumerate() {
                let offset = t as i32 - 2;
                let r = (row as i32 + offset).clamp(0, height as i32 - 1) as usize;
                acc += weight * horizontal[r * width + col];
            }
            out[row * width + col] = acc;
        }
    }
    out
}
