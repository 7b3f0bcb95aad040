//! Integration tests running the full compile-and-spot pipeline on
//! synthetic shapes.

use glyphspot::{CompiledQuery, GlyphSpotError, OwnedRaster, SpotConfig, Spotter};
use rand::{Rng, SeedableRng};

/// Draws a plus-shaped stroke centered at (`row`, `col`).
fn draw_cross(raster: &mut OwnedRaster, row: usize, col: usize, arm: usize) {
    for c in col - arm..=col + arm {
        raster.set(row, c, true);
    }
    for r in row - arm..=row + arm {
        raster.set(r, col, true);
    }
}

fn cross_query() -> OwnedRaster {
    let mut raster = OwnedRaster::new_fill(21, 21, false).unwrap();
    draw_cross(&mut raster, 10, 10, 7);
    raster
}

#[test]
fn compiled_cross_has_a_connected_landmark_tree() {
    let query = cross_query();
    let compiled = CompiledQuery::compile(query.view(), &SpotConfig::default()).unwrap();

    let tree = compiled.tree();
    assert!(tree.len() >= 3, "a cross should yield several landmarks");

    // Every non-root node reaches the root and reproduces its position
    // from the parent position plus its offset.
    for id in tree.ids() {
        if let (Some(parent), Some(offset)) = (tree.parent(id), tree.offset(id)) {
            assert_eq!(tree.position(parent) + offset, tree.position(id));
        } else {
            assert_eq!(id, tree.root());
        }
    }

    // The padded skeleton keeps the query footprint plus the border ring.
    assert_eq!(compiled.width(), 23);
    assert_eq!(compiled.height(), 23);
}

#[test]
fn planted_cross_is_spotted_near_its_location() {
    let query = cross_query();
    let compiled = CompiledQuery::compile(query.view(), &SpotConfig::default()).unwrap();
    let spotter = Spotter::new(compiled);

    let mut target = OwnedRaster::new_fill(80, 80, false).unwrap();
    draw_cross(&mut target, 40, 37, 7);

    let spotting = spotter.spot(target.view()).unwrap();
    assert_eq!(spotting.energy.width(), 80);
    assert_eq!(spotting.energy.height(), 80);
    assert!(spotting.energy.as_slice().iter().all(|&v| v >= 0.0));
    assert!(!spotting.spots.is_empty());

    // The ranking is ascending in energy.
    for pair in spotting.spots.windows(2) {
        assert!(pair[0].energy <= pair[1].energy);
    }

    // The best candidate lands in the neighborhood of the planted cross,
    // and far corners of the blank target score strictly worse.
    let best = &spotting.spots[0];
    let dr = (best.row as i64 - 40).abs();
    let dc = (best.col as i64 - 37).abs();
    assert!(
        dr <= 25 && dc <= 25,
        "best spot ({}, {}) is far from the planted cross",
        best.row,
        best.col
    );
    let corner = spotting.energy.value(4, 75).unwrap();
    assert!(best.energy < corner);
}

#[test]
fn speckle_noise_still_produces_a_ranked_surface() {
    let query = cross_query();
    let compiled = CompiledQuery::compile(query.view(), &SpotConfig::default()).unwrap();
    let spotter = Spotter::new(compiled).with_config(SpotConfig {
        limit: 5,
        ..SpotConfig::default()
    });

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut target = OwnedRaster::new_fill(64, 64, false).unwrap();
    for row in 0..64 {
        for col in 0..64 {
            if rng.random_bool(0.05) {
                target.set(row, col, true);
            }
        }
    }
    draw_cross(&mut target, 30, 30, 7);

    let spotting = spotter.spot(target.view()).unwrap();
    assert!(spotting.spots.len() <= 5);
    assert!(!spotting.spots.is_empty());
    assert!(spotting.energy.as_slice().iter().all(|&v| v >= 0.0));
    for spot in &spotting.spots {
        let region = spot.region;
        assert!(region.row + region.height <= 64);
        assert!(region.col + region.width <= 64);
    }
}

#[test]
fn blank_query_is_rejected_eagerly() {
    let raster = OwnedRaster::new_fill(16, 16, false).unwrap();
    let err = CompiledQuery::compile(raster.view(), &SpotConfig::default()).unwrap_err();
    assert_eq!(
        err,
        GlyphSpotError::InvalidInput {
            reason: "query raster has no foreground pixels",
        }
    );
}

#[test]
fn blank_target_is_rejected_eagerly() {
    let query = cross_query();
    let compiled = CompiledQuery::compile(query.view(), &SpotConfig::default()).unwrap();
    let spotter = Spotter::new(compiled);

    let target = OwnedRaster::new_fill(40, 40, false).unwrap();
    let err = spotter.spot(target.view()).unwrap_err();
    assert_eq!(
        err,
        GlyphSpotError::InvalidInput {
            reason: "target raster has no foreground pixels",
        }
    );
}

#[test]
fn isolated_dot_cannot_become_a_tree() {
    // A single pixel skeletonizes to itself and yields no walkable
    // neighborhood, so compilation reports the degenerate input instead of
    // returning an empty tree.
    let mut raster = OwnedRaster::new_fill(12, 12, false).unwrap();
    raster.set(6, 6, true);
    let err = CompiledQuery::compile(raster.view(), &SpotConfig::default()).unwrap_err();
    assert!(matches!(err, GlyphSpotError::InvalidInput { .. }));
}
