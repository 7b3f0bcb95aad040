//! Greedy landmark placement along a skeleton.
//!
//! Starting from the corner/junction seeds, the walk visits skeleton pixels
//! outward at a fixed spacing. Pixels strictly closer than the spacing on
//! both axes are redundant and removed from the working set for good; pixels
//! exactly one spacing away along an axis become new landmarks. When a node
//! discovers several continuations at once, the first keeps the current
//! branch going and the rest wait in a side queue, so one branch finishes
//! before the next starts.

use std::collections::VecDeque;

use crate::geom::Point;
use crate::raster::RasterView;
use crate::util::{GlyphSpotError, GlyphSpotResult};

/// Landmark positions plus the synthetic center-of-mass reference point.
///
/// `points` holds walk-discovered landmarks first (in discovery order),
/// followed by the corner seeds (in seed order). `center_of_mass` is the
/// coordinate-wise integer mean of every non-seed skeleton pixel; it is a
/// reference position, not a detected landmark.
#[derive(Clone, Debug)]
pub struct Landmarks {
    /// All landmark positions, iteration order fixed.
    pub points: Vec<Point>,
    /// Integer mean of the non-seed skeleton pixels.
    pub center_of_mass: Point,
}

/// Places landmarks over `skeleton` by walking outward from `seeds`.
///
/// `skeleton` must already carry a background border so neighbor lookups
/// stay in-bounds. Fails with `InvalidInput` when there are no seeds or no
/// non-seed skeleton pixels to walk over.
pub fn place_landmarks(
    skeleton: RasterView<'_>,
    seeds: &[Point],
    spacing: i32,
) -> GlyphSpotResult<Landmarks> {
    if seeds.is_empty() {
        return Err(GlyphSpotError::InvalidInput {
            reason: "no corner seeds detected on the skeleton",
        });
    }
    if spacing <= 0 {
        return Err(GlyphSpotError::InvalidInput {
            reason: "landmark spacing must be positive",
        });
    }

    let width = skeleton.width();
    let height = skeleton.height();
    let mut is_seed = vec![false; width * height];
    for seed in seeds {
        let (row, col) = (seed.row, seed.col);
        if row >= 0 && col >= 0 && (row as usize) < height && (col as usize) < width {
            is_seed[row as usize * width + col as usize] = true;
        }
    }

    // Working set: non-seed skeleton pixels in row-major order.
    let mut working: Vec<Point> = Vec::new();
    for row in 0..height {
        for col in 0..width {
            if skeleton.get(row, col) == Some(true) && !is_seed[row * width + col] {
                working.push(Point::new(row as i32, col as i32));
            }
        }
    }
    if working.is_empty() {
        return Err(GlyphSpotError::InvalidInput {
            reason: "skeleton has no walkable pixels beyond the seeds",
        });
    }

    let center_of_mass = integer_mean(&working);

    // A pixel may only ever become one landmark, even when two walks reach
    // it at the same spacing.
    let mut enqueued = vec![false; width * height];
    let mut discovered: Vec<Point> = Vec::new();

    for seed in seeds {
        let mut active: VecDeque<Point> = VecDeque::new();
        let mut deferred: VecDeque<Point> = VecDeque::new();
        active.push_back(*seed);

        while let Some(node) = active.pop_front().or_else(|| deferred.pop_front()) {
            let mut first_continuation = true;
            working.retain(|&pixel| {
                let dr = (pixel.row - node.row).abs();
                let dc = (pixel.col - node.col).abs();
                if dr < spacing && dc < spacing {
                    // Redundant: already represented by the current node.
                    return false;
                }
                let on_ring = (dr == spacing && dc <= spacing) || (dc == spacing && dr <= spacing);
                if on_ring {
                    let idx = pixel.row as usize * width + pixel.col as usize;
                    if !is_seed[idx] && !enqueued[idx] {
                        enqueued[idx] = true;
                        discovered.push(pixel);
                        if first_continuation {
                            active.push_back(pixel);
                            first_continuation = false;
                        } else {
                            deferred.push_back(pixel);
                        }
                    }
                }
                true
            });
        }
    }

    let mut points = discovered;
    points.extend_from_slice(seeds);
    Ok(Landmarks {
        points,
        center_of_mass,
    })
}

fn integer_mean(points: &[Point]) -> Point {
    let mut sum_row = 0i64;
    let mut sum_col = 0i64;
    for p in points {
        sum_row += i64::from(p.row);
        sum_col += i64::from(p.col);
    }
    let n = points.len() as i64;
    Point::new((sum_row / n) as i32, (sum_col / n) as i32)
}
