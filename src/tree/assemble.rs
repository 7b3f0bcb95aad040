//! Greedy tree assembly from a landmark set.
//!
//! The root is the landmark nearest the center of mass. Growth repeatedly
//! attaches the globally closest (unattached, attached) pair. This is a
//! greedy single-linkage construction, not a minimum spanning tree: once a
//! node joins the tree its pair distances are never revisited. Downstream
//! energy scores are calibrated against this exact heuristic, so it must
//! not be swapped for an MST.

use crate::landmark::Landmarks;
use crate::trace::{trace_event, trace_span};
use crate::tree::{NodeId, PartTree};
use crate::util::{GlyphSpotError, GlyphSpotResult};

/// Links the landmark set into a rooted tree with parent-relative offsets.
///
/// Iteration order is fixed: unattached landmarks are scanned in landmark
/// order, attached ones in attachment order, and strict `<` comparison
/// means the first-scanned minimum wins all ties.
pub fn assemble(landmarks: &Landmarks) -> GlyphSpotResult<PartTree> {
    let points = &landmarks.points;
    if points.is_empty() {
        return Err(GlyphSpotError::InvalidInput {
            reason: "cannot assemble a tree from zero landmarks",
        });
    }
    let _span = trace_span!("assemble_tree", landmarks = points.len()).entered();

    let mut root = 0usize;
    let mut best = i64::MAX;
    for (i, point) in points.iter().enumerate() {
        let d = point.distance_sq(landmarks.center_of_mass);
        if d < best {
            best = d;
            root = i;
        }
    }

    let mut tree = PartTree::with_positions(points, root);

    // Attachment order; also the inner scan order for later passes.
    let mut attached: Vec<usize> = Vec::with_capacity(points.len());
    attached.push(root);
    let mut remaining: Vec<usize> = (0..points.len()).filter(|&i| i != root).collect();

    while !remaining.is_empty() {
        let mut best_pair: Option<(usize, usize)> = None;
        let mut best_distance = i64::MAX;
        for (slot, &child) in remaining.iter().enumerate() {
            for &parent in &attached {
                let d = points[child].distance_sq(points[parent]);
                if d < best_distance {
                    best_distance = d;
                    best_pair = Some((slot, parent));
                }
            }
        }

        // Unreachable with arena identity, kept as a defensive guard.
        let Some((slot, parent)) = best_pair else {
            trace_event!(
                "degenerate_topology",
                attached = attached.len(),
                total = points.len()
            );
            return Err(GlyphSpotError::DegenerateTopology {
                attached: attached.len(),
                total: points.len(),
            });
        };

        let child = remaining.remove(slot);
        tree.attach(NodeId(child as u32), NodeId(parent as u32));
        attached.push(child);
    }

    trace_event!("tree_assembled", nodes = tree.len());
    Ok(tree)
}
