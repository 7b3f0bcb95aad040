//! Topological thinning of binary shapes.
//!
//! `skeletonize` reduces a foreground blob to a 1-pixel-wide skeleton with
//! the Zhang-Suen two-subiteration transform, preserving connectivity.
//! `pad_border` adds a one-pixel background ring so later neighbor lookups
//! never leave the buffer.

use crate::raster::{OwnedRaster, RasterView};
use crate::util::GlyphSpotResult;

pub mod corners;

/// Thins the foreground to a 1-pixel-wide skeleton.
///
/// Out-of-bounds neighbors are treated as background. Iterates both
/// subiterations until a full pass deletes nothing.
pub fn skeletonize(src: RasterView<'_>) -> GlyphSpotResult<OwnedRaster> {
    let mut current = OwnedRaster::from_view(src)?;
    let height = current.height();
    let width = current.width();

    let mut deletions: Vec<(usize, usize)> = Vec::new();
    loop {
        let mut changed = false;
        for pass in 0..2 {
            deletions.clear();
            for row in 0..height {
                for col in 0..width {
                    if current.get(row, col) == Some(true)
                        && removable(&current, row, col, pass == 0)
                    {
                        deletions.push((row, col));
                    }
                }
            }
            for &(row, col) in &deletions {
                current.set(row, col, false);
            }
            changed |= !deletions.is_empty();
        }
        if !changed {
            return Ok(current);
        }
    }
}

/// Returns a copy of `src` with a one-pixel background border on all sides.
pub fn pad_border(src: RasterView<'_>) -> GlyphSpotResult<OwnedRaster> {
    let mut padded = OwnedRaster::new_fill(src.width() + 2, src.height() + 2, false)?;
    for row in 0..src.height() {
        for col in 0..src.width() {
            if src.get(row, col) == Some(true) {
                padded.set(row + 1, col + 1, true);
            }
        }
    }
    Ok(padded)
}

fn neighbor(raster: &OwnedRaster, row: usize, col: usize, dr: i32, dc: i32) -> bool {
    let nr = row as i32 + dr;
    let nc = col as i32 + dc;
    if nr < 0 || nc < 0 {
        return false;
    }
    raster.get(nr as usize, nc as usize).unwrap_or(false)
}

fn removable(raster: &OwnedRaster, row: usize, col: usize, first_pass: bool) -> bool {
    // P2..P9 clockwise from north.
    let p = [
        neighbor(raster, row, col, -1, 0),
        neighbor(raster, row, col, -1, 1),
        neighbor(raster, row, col, 0, 1),
        neighbor(raster, row, col, 1, 1),
        neighbor(raster, row, col, 1, 0),
        neighbor(raster, row, col, 1, -1),
        neighbor(raster, row, col, 0, -1),
        neighbor(raster, row, col, -1, -1),
    ];

    let set_count = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&set_count) {
        return false;
    }

    let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
    if transitions != 1 {
        return false;
    }

    let (north, east, south, west) = (p[0], p[2], p[4], p[6]);
    if first_pass {
        !(north && east && south) && !(east && south && west)
    } else {
        !(north && east && west) && !(north && south && west)
    }
}

#[cfg(test)]
mod tests {
    use super::{pad_border, skeletonize};
    use crate::raster::{OwnedRaster, RasterView};

    fn bar(width: usize, height: usize, rows: std::ops::Range<usize>) -> OwnedRaster {
        let mut raster = OwnedRaster::new_fill(width, height, false).unwrap();
        for row in rows {
            for col in 1..width - 1 {
                raster.set(row, col, true);
            }
        }
        raster
    }

    #[test]
    fn thin_line_is_stable() {
        let raster = bar(16, 7, 3..4);
        let skeleton = skeletonize(raster.view()).unwrap();
        assert_eq!(
            skeleton.view().foreground_count(),
            raster.view().foreground_count()
        );
        for col in 1..15 {
            assert_eq!(skeleton.get(3, col), Some(true));
        }
    }

    #[test]
    fn thick_bar_thins_to_single_row() {
        let raster = bar(20, 9, 3..6);
        let skeleton = skeletonize(raster.view()).unwrap();
        for col in 4..16 {
            let set: Vec<usize> = (0..9)
                .filter(|&row| skeleton.get(row, col) == Some(true))
                .collect();
            assert_eq!(set.len(), 1, "column {col} should be one pixel wide");
        }
    }

    #[test]
    fn pad_border_shifts_foreground_by_one() {
        let data = vec![true, false, false, true];
        let view = RasterView::from_slice(&data, 2, 2).unwrap();
        let padded = pad_border(view).unwrap();
        assert_eq!(padded.width(), 4);
        assert_eq!(padded.height(), 4);
        assert_eq!(padded.get(1, 1), Some(true));
        assert_eq!(padded.get(2, 2), Some(true));
        assert_eq!(padded.view().foreground_count(), 2);
        for col in 0..4 {
            assert_eq!(padded.get(0, col), Some(false));
            assert_eq!(padded.get(3, col), Some(false));
        }
    }
}
