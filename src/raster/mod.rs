//! Binary raster views and owned buffers.
//!
//! `RasterView` is a borrowed 2D view into a 1D `bool` buffer with an
//! explicit stride (`true` = foreground ink). The stride counts elements
//! between the starts of consecutive rows, so a stride larger than the width
//! represents padded rows. ROI slices are zero-copy views into the same
//! backing slice and retain the original stride.

use crate::util::{GlyphSpotError, GlyphSpotResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D binary raster view with an explicit stride.
#[derive(Copy, Clone)]
pub struct RasterView<'a> {
    data: &'a [bool],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RasterView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [bool], width: usize, height: usize) -> GlyphSpotResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [bool],
        width: usize,
        height: usize,
        stride: usize,
    ) -> GlyphSpotResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(GlyphSpotError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [bool] {
        self.data
    }

    /// Returns the pixel at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = row.checked_mul(self.stride)?.checked_add(col)?;
        self.data.get(idx).copied()
    }

    /// Returns a contiguous slice for `row` with length `width`.
    pub fn row(&self, row: usize) -> Option<&'a [bool]> {
        if row >= self.height {
            return None;
        }
        let start = row.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Counts foreground pixels.
    pub fn foreground_count(&self) -> usize {
        let mut count = 0;
        for row in 0..self.height {
            if let Some(slice) = self.row(row) {
                count += slice.iter().filter(|&&v| v).count();
            }
        }
        count
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> GlyphSpotResult<RasterView<'a>> {
        if width == 0 || height == 0 {
            return Err(GlyphSpotError::InvalidDimensions { width, height });
        }

        let out_of_bounds = GlyphSpotError::RoiOutOfBounds {
            row,
            col,
            width,
            height,
            raster_width: self.width,
            raster_height: self.height,
        };
        if row >= self.height || col >= self.width {
            return Err(out_of_bounds);
        }
        let end_col = col.checked_add(width).ok_or(out_of_bounds.clone())?;
        let end_row = row.checked_add(height).ok_or(out_of_bounds.clone())?;
        if end_col > self.width || end_row > self.height {
            return Err(out_of_bounds);
        }

        let start = row
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(col))
            .ok_or(GlyphSpotError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(GlyphSpotError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        RasterView::new(data, width, height, self.stride)
    }
}

/// Owned contiguous binary raster buffer.
#[derive(Clone)]
pub struct OwnedRaster {
    data: Vec<bool>,
    width: usize,
    height: usize,
}

impl OwnedRaster {
    /// Creates an owned raster from a contiguous buffer.
    pub fn from_vec(data: Vec<bool>, width: usize, height: usize) -> GlyphSpotResult<Self> {
        let needed = required_len(width, height, width)?;
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

    /// Creates a raster filled with a single value.
    pub fn new_fill(width: usize, height: usize, value: bool) -> GlyphSpotResult<Self> {
        let needed = required_len(width, height, width)?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
        })
    }

    /// Copies a borrowed view into an owned contiguous raster.
    pub fn from_view(view: RasterView<'_>) -> GlyphSpotResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            let slice = view.row(row).ok_or(GlyphSpotError::BufferTooSmall {
                needed: width * height,
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(slice);
        }
        Self::from_vec(data, width, height)
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a borrowed view of the raster.
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the pixel at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.view().get(row, col)
    }

    /// Sets the pixel at `(row, col)`; out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.height && col < self.width {
            self.data[row * self.width + col] = value;
        }
    }

    pub(crate) fn data(&self) -> &[bool] {
        &self.data
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> GlyphSpotResult<usize> {
    if width == 0 || height == 0 {
        return Err(GlyphSpotError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(GlyphSpotError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(GlyphSpotError::InvalidDimensions { width, height })?;
    Ok(needed)
}
