//! GlyphSpot is a part-structured matcher for hand-drawn symbol shapes.
//!
//! A binary query raster is thinned to a one-pixel skeleton, reduced to a
//! rooted tree of landmark nodes, and scored against every placement in a
//! target raster through a recursively composed distance transform. Lower
//! energy means a better match; ranked local minima are the candidate
//! occurrences of the query.

pub mod candidate;
pub mod dt;
mod field;
pub mod geom;
pub mod landmark;
pub mod raster;
pub mod skeleton;
mod spot;
pub mod tree;
pub mod util;

pub mod lowlevel;
pub(crate) mod trace;

pub use candidate::{find_local_minima, Minimum};
pub use field::EnergyField;
pub use geom::{Offset, Point};
pub use raster::{OwnedRaster, RasterView};
pub use spot::{CompiledQuery, Region, Spot, SpotConfig, Spotter, Spotting};
pub use tree::{NodeId, PartTree};
pub use util::{GlyphSpotError, GlyphSpotResult};
