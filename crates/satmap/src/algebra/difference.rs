//! Pixelwise difference over the overlap of two captures.

use std::ops::Range;

use ndarray::s;
use tracing::debug;

use super::window::Window;
use crate::error::{SatmapError, SatmapResult};
use crate::raster::Raster;

/// Subtract `b` from `a` over the region where their footprints overlap.
///
/// The captures must differ in date or instrument, and must overlap. The
/// output grid is the intersection rectangle at `a`'s resolution, and keeps
/// `a`'s metadata with the intersection footprint.
///
/// Each operand's window is located in its own grid. Overlap edges that fall
/// between pixels can round one window a pixel short or long; such windows
/// are fitted to the output extent. Windows further off (operands at
/// different resolutions) or reaching past the data fail with `ShapeMismatch`.
pub fn difference(a: &Raster, b: &Raster) -> SatmapResult<Raster> {
    if a.metadata().same_capture_day(b.metadata()) {
        return Err(SatmapError::SameCapture {
            instrument: a.metadata().instrument.clone(),
            date: a.metadata().date.clone(),
        });
    }

    let intersection = a
        .footprint()
        .intersection(b.footprint())
        .ok_or(SatmapError::NoOverlap)?;
    let shape = intersection.pixel_extent();

    let a_window = Window::locate(a.footprint(), &intersection)?.reconcile(shape, 1)?;
    let b_window = Window::locate(b.footprint(), &intersection.with_resolution(b.resolution()))?
        .reconcile(shape, 1)?;

    debug!(
        xcoords = ?intersection.xcoords(),
        ycoords = ?intersection.ycoords(),
        ?shape,
        ?a_window,
        ?b_window,
        "Differencing overlap"
    );

    let (a_rows, a_cols) = window_ranges(a, a_window, shape)?;
    let (b_rows, b_cols) = window_ranges(b, b_window, shape)?;
    let data = &a.data().slice(s![a_rows, a_cols]) - &b.data().slice(s![b_rows, b_cols]);

    Raster::from_parts(a.metadata().with_footprint(&intersection), data)
}

/// Row and column ranges for `window` in `raster`, checked against the
/// raster's own bounds.
fn window_ranges(
    raster: &Raster,
    window: Window,
    expected: (usize, usize),
) -> SatmapResult<(Range<usize>, Range<usize>)> {
    let (rows, cols) = raster.shape();
    let fits = window.rows.0 >= 0
        && window.cols.0 >= 0
        && window.rows.1 as usize <= rows
        && window.cols.1 as usize <= cols;

    if window.extent() != expected || !fits {
        return Err(SatmapError::ShapeMismatch {
            expected,
            actual: window.extent(),
        });
    }

    Ok((
        window.rows.0 as usize..window.rows.1 as usize,
        window.cols.0 as usize..window.cols.1 as usize,
    ))
}
