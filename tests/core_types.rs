use glyphspot::{EnergyField, GlyphSpotError, Offset, OwnedRaster, Point, RasterView};

#[test]
fn raster_view_rejects_invalid_dimensions() {
    let data = [false; 4];

    let err = RasterView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        GlyphSpotError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = RasterView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        GlyphSpotError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn raster_view_rejects_invalid_stride() {
    let data = [false; 8];

    let err = RasterView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        GlyphSpotError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn raster_view_rejects_small_buffer() {
    let data = [false; 3];

    let err = RasterView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, GlyphSpotError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn raster_view_roi_matches_expected_values() {
    let data: Vec<bool> = (0..16).map(|i| i % 5 == 0).collect();
    let view = RasterView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.foreground_count(), 4);

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[true, false]);
    assert_eq!(roi.row(1).unwrap(), &[false, true]);
    assert_eq!(roi.get(0, 0), Some(true));
    assert_eq!(roi.get(0, 2), None);

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        GlyphSpotError::RoiOutOfBounds {
            row: 3,
            col: 3,
            width: 2,
            height: 2,
            raster_width: 4,
            raster_height: 4,
        }
    );
}

#[test]
fn owned_raster_round_trips_through_view() {
    let mut raster = OwnedRaster::new_fill(3, 2, false).unwrap();
    raster.set(1, 2, true);
    let copy = OwnedRaster::from_view(raster.view()).unwrap();
    assert_eq!(copy.get(1, 2), Some(true));
    assert_eq!(copy.view().foreground_count(), 1);
}

#[test]
fn point_offset_arithmetic_is_exact() {
    let parent = Point::new(10, 20);
    let child = Point::new(7, 24);
    let offset = child - parent;
    assert_eq!(offset, Offset::new(-3, 4));
    assert_eq!(parent + offset, child);
}

#[test]
fn energy_field_checks_buffer_length() {
    let err = EnergyField::from_vec(vec![0.0; 5], 2, 3).err().unwrap();
    assert_eq!(err, GlyphSpotError::BufferTooSmall { needed: 6, got: 5 });

    let field = EnergyField::from_vec(vec![1.5; 6], 2, 3).unwrap();
    assert_eq!(field.value(2, 1), Some(1.5));
    assert_eq!(field.value(3, 0), None);
}
