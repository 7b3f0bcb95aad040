//! Scalar field storage for distance transforms and matching energy.

use crate::geom::Offset;
use crate::util::{GlyphSpotError, GlyphSpotResult};

/// Owned row-major 2D field of `f32` values.
///
/// Used both as the per-node distance-transform accumulator and as the final
/// matching-energy output. The final field is non-negative; intermediate
/// accumulators are too, since they are sums of distances.
#[derive(Clone, Debug)]
pub struct EnergyField {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl EnergyField {
    /// Creates a field from a contiguous row-major buffer.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> GlyphSpotResult<Self> {
        let needed = width
            .checked_mul(height)
            .filter(|_| width > 0 && height > 0)
            .ok_or(GlyphSpotError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(GlyphSpotError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a field filled with a single value.
    pub fn new_fill(width: usize, height: usize, value: f32) -> GlyphSpotResult<Self> {
        let needed = width
            .checked_mul(height)
            .filter(|_| width > 0 && height > 0)
            .ok_or(GlyphSpotError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
        })
    }

    /// Returns the field width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the field height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the value at `(row, col)` if it is within bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Multiplies every value by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// Adds `src` shifted by `offset` into the overlapping region of `self`.
    ///
    /// The shifted copy of `src` occupies rows `[dy, height)` for `dy >= 0`
    /// and `[0, height + dy)` for `dy < 0` (same per column), so the crop
    /// corner follows the sign of each axis. Cells outside the overlap are
    /// left untouched. Both fields must have identical dimensions.
    pub fn add_shifted(&mut self, src: &EnergyField, offset: Offset) -> GlyphSpotResult<()> {
        if src.width != self.width || src.height != self.height {
            return Err(GlyphSpotError::InvalidDimensions {
                width: src.width,
                height: src.height,
            });
        }
        let height = self.height as i64;
        let width = self.width as i64;
        let dy = i64::from(offset.dy);
        let dx = i64::from(offset.dx);
        if dy.abs() >= height || dx.abs() >= width {
            return Err(GlyphSpotError::ShapeMismatch {
                dy: offset.dy,
                dx: offset.dx,
                height: self.height,
                width: self.width,
            });
        }

        let (dst_row0, src_row0, rows) = if dy >= 0 {
            (dy as usize, 0, (height - dy) as usize)
        } else {
            (0, (-dy) as usize, (height + dy) as usize)
        };
        let (dst_col0, src_col0, cols) = if dx >= 0 {
            (dx as usize, 0, (width - dx) as usize)
        } else {
            (0, (-dx) as usize, (width + dx) as usize)
        };

        for r in 0..rows {
            let dst_base = (dst_row0 + r) * self.width + dst_col0;
            let src_base = (src_row0 + r) * src.width + src_col0;
            let dst_run = &mut self.data[dst_base..dst_base + cols];
            let src_run = &src.data[src_base..src_base + cols];
            for (d, s) in dst_run.iter_mut().zip(src_run) {
                *d += *s;
            }
        }
        Ok(())
    }

    /// Replaces every value with its square root.
    pub(crate) fn sqrt_in_place(&mut self) {
        for value in &mut self.data {
            *value = value.sqrt();
        }
    }

    /// Copies out a `height x width` sub-field starting at `(row, col)`.
    pub(crate) fn crop(
        &self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> GlyphSpotResult<EnergyField> {
        let end_row = row.checked_add(height);
        let end_col = col.checked_add(width);
        match (end_row, end_col) {
            (Some(er), Some(ec)) if er <= self.height && ec <= self.width => {}
            _ => {
                return Err(GlyphSpotError::RoiOutOfBounds {
                    row,
                    col,
                    width,
                    height,
                    raster_width: self.width,
                    raster_height: self.height,
                })
            }
        }
        let mut data = Vec::with_capacity(width * height);
        for r in 0..height {
            let base = (row + r) * self.width + col;
            data.extend_from_slice(&self.data[base..base + width]);
        }
        EnergyField::from_vec(data, width, height)
    }
}
