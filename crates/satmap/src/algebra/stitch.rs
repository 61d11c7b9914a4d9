//! Union of two same-resolution rasters.

use ndarray::Array2;
use tracing::debug;

use super::window::{check_drift, paste, Window};
use crate::error::{SatmapError, SatmapResult};
use crate::raster::Raster;

/// Combine two rasters into their bounding-box union.
///
/// Both operands must share a resolution; resampling is [`mosaic`]'s job.
/// `a` is pasted first and `b` second, so `b` wins wherever they overlap.
/// Pixels covered by neither stay zero. The result keeps `a`'s metadata with
/// the union footprint.
///
/// Each operand's data must span exactly its footprint's pixel extent,
/// otherwise the call fails with `ShapeMismatch`.
///
/// [`mosaic`]: super::mosaic::mosaic
pub fn stitch(a: &Raster, b: &Raster) -> SatmapResult<Raster> {
    stitch_within(a, b, 0)
}

/// [`stitch`] tolerating data up to `drift` pixels off its footprint extent,
/// as left behind by resampling.
pub(crate) fn stitch_within(a: &Raster, b: &Raster, drift: usize) -> SatmapResult<Raster> {
    if a.resolution() != b.resolution() {
        return Err(SatmapError::ResolutionMismatch {
            left: a.resolution(),
            right: b.resolution(),
        });
    }

    let union = a.footprint().union(b.footprint());
    let shape = union.pixel_extent();
    let mut data = Array2::zeros(shape);

    for raster in [a, b] {
        check_drift(raster.footprint().pixel_extent(), raster.shape(), drift)?;
        let window = Window::locate(&union, raster.footprint())?.fit_to(raster.shape());
        debug!(
            xcoords = ?raster.footprint().xcoords(),
            ycoords = ?raster.footprint().ycoords(),
            ?window,
            "Pasting raster into union"
        );
        paste(&mut data, raster.data().view(), window);
    }

    debug!(
        xcoords = ?union.xcoords(),
        ycoords = ?union.ycoords(),
        ?shape,
        "Stitched rasters"
    );

    Raster::from_parts(a.metadata().with_footprint(&union), data)
}
