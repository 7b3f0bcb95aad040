//! Error types for glyphspot.

use thiserror::Error;

/// Result alias for glyphspot operations.
pub type GlyphSpotResult<T> = std::result::Result<T, GlyphSpotError>;

/// Errors that can occur while compiling a query or spotting a target.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GlyphSpotError {
    /// Width or height is zero or overflows the buffer size computation.
    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride {
        /// Row width in pixels.
        width: usize,
        /// Stride in elements between row starts.
        stride: usize,
    },
    /// Backing buffer is too small for the requested dimensions.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Minimum number of elements required.
        needed: usize,
        /// Number of elements provided.
        got: usize,
    },
    /// Requested region does not fit inside the raster.
    #[error("roi {width}x{height} at ({row}, {col}) outside raster {raster_width}x{raster_height}")]
    RoiOutOfBounds {
        /// Region top row.
        row: usize,
        /// Region left column.
        col: usize,
        /// Region width.
        width: usize,
        /// Region height.
        height: usize,
        /// Raster width.
        raster_width: usize,
        /// Raster height.
        raster_height: usize,
    },
    /// Input raster cannot produce a landmark tree (empty, blank, or the
    /// skeleton yields no corner seeds).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What made the input unusable.
        reason: &'static str,
    },
    /// The greedy attach step found no candidate pair while landmarks
    /// remained unattached. Indicates a disconnected landmark set.
    #[error("degenerate topology: attached {attached} of {total} landmarks")]
    DegenerateTopology {
        /// Landmarks attached before the guard fired.
        attached: usize,
        /// Total landmarks in the set.
        total: usize,
    },
    /// A node offset reaches or exceeds the working canvas extent, so the
    /// shifted accumulator would not overlap at all.
    #[error("offset ({dy}, {dx}) exceeds canvas {height}x{width}")]
    ShapeMismatch {
        /// Row component of the offending offset.
        dy: i32,
        /// Column component of the offending offset.
        dx: i32,
        /// Canvas height.
        height: usize,
        /// Canvas width.
        width: usize,
    },
    /// Underlying image decode/encode failure.
    #[cfg(feature = "image-io")]
    #[error("image i/o: {reason}")]
    ImageIo {
        /// Message from the image backend.
        reason: String,
    },
}
