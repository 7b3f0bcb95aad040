//! Exact Euclidean distance transforms.
//!
//! Implements the Felzenszwalb-Huttenlocher lower-envelope algorithm over
//! squared distances: one pass along rows, one along columns, each pass a
//! 1-D transform. Background pixels start at a finite sentinel larger than
//! any reachable squared distance, which keeps the envelope arithmetic free
//! of infinities.

use crate::field::EnergyField;
use crate::raster::RasterView;
use crate::util::{GlyphSpotError, GlyphSpotResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub mod energy;

/// Computes the Euclidean distance of every pixel to the nearest foreground
/// pixel, divided by `divisor`.
pub fn euclidean_dt(src: RasterView<'_>, divisor: f32) -> GlyphSpotResult<EnergyField> {
    if divisor <= 0.0 {
        return Err(GlyphSpotError::InvalidInput {
            reason: "distance normalization divisor must be positive",
        });
    }
    if src.foreground_count() == 0 {
        return Err(GlyphSpotError::InvalidInput {
            reason: "distance transform of a raster with no foreground",
        });
    }

    let width = src.width();
    let height = src.height();
    let sentinel = (width * width + height * height) as f32;

    let mut grid = vec![0.0f32; width * height];
    for row in 0..height {
        let slice = src.row(row).expect("row within raster bounds");
        let base = row * width;
        for (col, &fg) in slice.iter().enumerate() {
            grid[base + col] = if fg { 0.0 } else { sentinel };
        }
    }

    row_pass(&mut grid, width);
    column_pass(&mut grid, width, height);

    let inv = 1.0 / divisor;
    for value in &mut grid {
        *value = value.sqrt() * inv;
    }
    EnergyField::from_vec(grid, width, height)
}

#[cfg(feature = "rayon")]
fn row_pass(grid: &mut [f32], width: usize) {
    grid.par_chunks_mut(width).for_each(|row| {
        let mut scratch = Scratch::new(width);
        scratch.transform(row);
    });
}

#[cfg(not(feature = "rayon"))]
fn row_pass(grid: &mut [f32], width: usize) {
    let mut scratch = Scratch::new(width);
    for row in grid.chunks_mut(width) {
        scratch.transform(row);
    }
}

#[cfg(feature = "rayon")]
fn column_pass(grid: &mut [f32], width: usize, height: usize) {
    let shared: &[f32] = grid;
    let columns: Vec<Vec<f32>> = (0..width)
        .into_par_iter()
        .map(|col| {
            let mut buffer: Vec<f32> = (0..height).map(|row| shared[row * width + col]).collect();
            let mut scratch = Scratch::new(height);
            scratch.transform(&mut buffer);
            buffer
        })
        .collect();
    for (col, buffer) in columns.iter().enumerate() {
        for (row, &value) in buffer.iter().enumerate() {
            grid[row * width + col] = value;
        }
    }
}

#[cfg(not(feature = "rayon"))]
fn column_pass(grid: &mut [f32], width: usize, height: usize) {
    let mut buffer = vec![0.0f32; height];
    let mut scratch = Scratch::new(height);
    for col in 0..width {
        for row in 0..height {
            buffer[row] = grid[row * width + col];
        }
        scratch.transform(&mut buffer);
        for row in 0..height {
            grid[row * width + col] = buffer[row];
        }
    }
}

/// Reusable buffers for the 1-D lower-envelope transform.
struct Scratch {
    envelope: Vec<f32>,
    parabolas: Vec<usize>,
    boundaries: Vec<f32>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            envelope: vec![0.0; n],
            parabolas: vec![0; n],
            boundaries: vec![0.0; n + 1],
        }
    }

    /// 1-D squared-distance transform of `f` in place.
    fn transform(&mut self, f: &mut [f32]) {
        let n = f.len();
        if n <= 1 {
            return;
        }
        let v = &mut self.parabolas;
        let z = &mut self.boundaries;
        let d = &mut self.envelope;

        let mut k = 0usize;
        v[0] = 0;
        z[0] = f32::NEG_INFINITY;
        z[1] = f32::INFINITY;
        for q in 1..n {
            let mut s = intersection(f, q, v[k]);
            while s <= z[k] {
                k -= 1;
                s = intersection(f, q, v[k]);
            }
            k += 1;
            v[k] = q;
            z[k] = s;
            z[k + 1] = f32::INFINITY;
        }

        let mut k = 0usize;
        for q in 0..n {
            while z[k + 1] < q as f32 {
                k += 1;
            }
            let diff = q as f32 - v[k] as f32;
            d[q] = diff * diff + f[v[k]];
        }
        f.copy_from_slice(&d[..n]);
    }
}

/// Abscissa where the parabolas rooted at `q` and `p` cross.
#[inline]
fn intersection(f: &[f32], q: usize, p: usize) -> f32 {
    let qf = q as f32;
    let pf = p as f32;
    ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
}
