//! Conversions between ground coordinates and pixel indices.
//!
//! Rows grow as ground Y decreases from the footprint's top edge; columns grow
//! as ground X increases from its left edge.
//!
//! [`to_ground`] samples at half-resolution steps, so it is not the exact
//! inverse of [`to_pixel`]: `to_pixel(to_ground(r, c))` lands on
//! `(r / 2, c / 2)` rounded half to even. Stored outputs depend on this
//! convention, so it is kept as is.

use crate::error::{SatmapError, SatmapResult};
use crate::footprint::Footprint;

/// Round half to even, the convention used for every pixel index.
#[inline]
pub(crate) fn round_index(value: f64) -> f64 {
    value.round_ties_even()
}

/// Convert a ground point to the nearest `(row, col)` pixel index.
///
/// `row = round((max_y - y) / resolution)`, `col = round((x - min_x) / resolution)`.
/// Fails with `OutOfRange` when the point lies strictly outside the footprint.
pub fn to_pixel(footprint: &Footprint, x: f64, y: f64) -> SatmapResult<(usize, usize)> {
    if !footprint.contains_point(x, y) {
        return Err(SatmapError::OutOfRange {
            x,
            y,
            xcoords: footprint.xcoords(),
            ycoords: footprint.ycoords(),
        });
    }

    Ok(pixel_index(footprint, x, y))
}

/// Unchecked form of [`to_pixel`] for points already known to be in range.
pub(crate) fn pixel_index(footprint: &Footprint, x: f64, y: f64) -> (usize, usize) {
    let row = round_index((footprint.max_y - y).abs() / footprint.resolution);
    let col = round_index((x - footprint.min_x) / footprint.resolution);
    (row.max(0.0) as usize, col.max(0.0) as usize)
}

/// Convert a pixel index to the ground coordinate of its sampling point.
///
/// `x = min_x + col * resolution / 2`, `y = max_y - row * resolution / 2`.
pub fn to_ground(footprint: &Footprint, row: usize, col: usize) -> (f64, f64) {
    let half = footprint.resolution / 2.0;
    let x = footprint.min_x + col as f64 * half;
    let y = footprint.max_y - row as f64 * half;
    (x, y)
}
