//! Recursive deformable distance-transform energy.
//!
//! Every node starts from one shared base distance transform of the padded
//! target canvas. Child accumulators are folded into their parent by a
//! shift/crop/add at the child's offset, then the parent is attenuated by
//! the decay constant, so deeper subtrees contribute exponentially less per
//! unit distance. The fold is an explicit post-order reduction, never call
//! recursion.

use crate::dt::euclidean_dt;
use crate::field::EnergyField;
use crate::raster::{OwnedRaster, RasterView};
use crate::trace::{trace_event, trace_span};
use crate::tree::PartTree;
use crate::util::{GlyphSpotError, GlyphSpotResult};

/// Tuning knobs for the energy composition.
#[derive(Clone, Copy, Debug)]
pub struct EnergyParams {
    /// Attenuation applied to a node's accumulator after folding its
    /// children.
    pub decay: f32,
    /// Divisor normalizing the base distance transform.
    pub dt_divisor: f32,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            decay: 1.5,
            dt_divisor: 1.0,
        }
    }
}

/// Composes the matching-energy field for `tree` over `target`.
///
/// The working canvas pads the target by the query extent on every side so
/// any shifted placement stays in-bounds; the returned field is cropped
/// back to the target dimensions. A single-node tree degenerates to the
/// square root of the base distance transform.
pub fn compose_energy(
    tree: &PartTree,
    target: RasterView<'_>,
    query_width: usize,
    query_height: usize,
    params: &EnergyParams,
) -> GlyphSpotResult<EnergyField> {
    if query_width == 0 || query_height == 0 {
        return Err(GlyphSpotError::InvalidDimensions {
            width: query_width,
            height: query_height,
        });
    }
    if params.decay <= 0.0 {
        return Err(GlyphSpotError::InvalidInput {
            reason: "decay constant must be positive",
        });
    }
    let _span = trace_span!(
        "compose_energy",
        nodes = tree.len(),
        target_width = target.width(),
        target_height = target.height()
    )
    .entered();

    let canvas = padded_canvas(target, query_width, query_height)?;
    let base = euclidean_dt(canvas.view(), params.dt_divisor)?;
    trace_event!(
        "base_dt_ready",
        canvas_width = canvas.width(),
        canvas_height = canvas.height()
    );

    let order = tree.post_order();
    let mut accumulators: Vec<Option<EnergyField>> = vec![None; tree.len()];
    for id in order {
        let mut field = base.clone();
        let children = tree.children(id);
        for &child in children {
            let child_field = accumulators[child.index()]
                .take()
                .expect("post-order visits children first");
            let offset = tree.offset(child).expect("non-root child carries an offset");
            field.add_shifted(&child_field, offset)?;
        }
        if !children.is_empty() {
            field.scale(1.0 / params.decay);
        }
        accumulators[id.index()] = Some(field);
    }

    let mut energy = accumulators[tree.root().index()]
        .take()
        .expect("root accumulator is computed last");
    energy.sqrt_in_place();
    energy.crop(query_height, query_width, target.width(), target.height())
}

/// Copies the target into the center of a background canvas padded by the
/// query extent on every side.
fn padded_canvas(
    target: RasterView<'_>,
    query_width: usize,
    query_height: usize,
) -> GlyphSpotResult<OwnedRaster> {
    let width = target.width() + 2 * query_width;
    let height = target.height() + 2 * query_height;
    let mut canvas = OwnedRaster::new_fill(width, height, false)?;
    for row in 0..target.height() {
        let slice = target.row(row).expect("row within target bounds");
        for (col, &fg) in slice.iter().enumerate() {
            if fg {
                canvas.set(row + query_height, col + query_width, true);
            }
        }
    }
    Ok(canvas)
}
