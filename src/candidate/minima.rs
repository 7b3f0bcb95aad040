//! Local-minimum extraction over matching-energy fields.
//!
//! A pixel is a candidate when it equals the minimum of its window under a
//! separable two-pass minimum filter with clamped borders. Candidates are
//! ranked ascending by energy with deterministic tie-breaking.

use crate::field::EnergyField;

/// One local minimum of the energy surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimum {
    /// Row of the minimum in the energy field.
    pub row: usize,
    /// Column of the minimum in the energy field.
    pub col: usize,
    /// Energy value at the minimum (lower is a better match).
    pub energy: f32,
}

fn minimum_cmp(a: &Minimum, b: &Minimum) -> std::cmp::Ordering {
    a.energy
        .total_cmp(&b.energy)
        .then_with(|| a.row.cmp(&b.row))
        .then_with(|| a.col.cmp(&b.col))
}

/// Returns up to `limit` local minima of `field`, best first.
///
/// `window` is the full filter extent; a pixel survives when it equals the
/// minimum over the `window x window` neighborhood anchored scipy-style at
/// `index - window / 2`, intersected with the field.
pub fn find_local_minima(field: &EnergyField, window: usize, limit: usize) -> Vec<Minimum> {
    if limit == 0 {
        return Vec::new();
    }
    let window = window.max(1);
    let width = field.width();
    let height = field.height();
    let data = field.as_slice();

    let filtered = min_filter(data, width, height, window);

    let mut minima: Vec<Minimum> = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let idx = row * width + col;
            if data[idx] == filtered[idx] {
                minima.push(Minimum {
                    row,
                    col,
                    energy: data[idx],
                });
            }
        }
    }

    minima.sort_by(minimum_cmp);
    minima.truncate(limit);
    minima
}

/// Separable minimum filter; out-of-range window cells are clamped away.
fn min_filter(data: &[f32], width: usize, height: usize, window: usize) -> Vec<f32> {
    let lead = window / 2;

    let mut horizontal = vec![0.0f32; width * height];
    for row in 0..height {
        let base = row * width;
        for col in 0..width {
            let start = col.saturating_sub(lead);
            let end = (start + window).min(width).max(col + 1);
            let mut min = f32::INFINITY;
            for c in start..end {
                min = min.min(data[base + c]);
            }
            horizontal[base + col] = min;
        }
    }

    let mut out = vec![0.0f32; width * height];
    for row in 0..height {
        let start = row.saturating_sub(lead);
        let end = (start + window).min(height).max(row + 1);
        for col in 0..width {
            let mut min = f32::INFINITY;
            for r in start..end {
                min = min.min(horizontal[r * width + col]);
            }
            out[row * width + col] = min;
        }
    }
    out
}
