//! Pixel windows: where a raster lands inside another raster's grid.

use ndarray::{s, Array2, ArrayView2};
use tracing::warn;

use crate::error::{SatmapError, SatmapResult};
use crate::footprint::Footprint;
use crate::transform::to_pixel;

/// Half-open `[start, end)` pixel ranges along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub rows: (isize, isize),
    pub cols: (isize, isize),
}

impl Window {
    /// Window covering `inner` when expressed in `frame`'s pixel grid.
    ///
    /// `inner` must lie within `frame`.
    pub fn locate(frame: &Footprint, inner: &Footprint) -> SatmapResult<Self> {
        let start = to_pixel(frame, inner.min_x, inner.max_y)?;
        let end = to_pixel(frame, inner.max_x, inner.min_y)?;
        Ok(Self {
            rows: (start.0 as isize, end.0 as isize),
            cols: (start.1 as isize, end.1 as isize),
        })
    }

    /// `(rows, cols)` covered by the window.
    pub fn extent(&self) -> (usize, usize) {
        (
            (self.rows.1 - self.rows.0).max(0) as usize,
            (self.cols.1 - self.cols.0).max(0) as usize,
        )
    }

    /// Adjust both axes so the window spans exactly `shape`.
    pub fn fit_to(self, shape: (usize, usize)) -> Self {
        Self {
            rows: handle_edge(self.rows.0, self.rows.1, shape.0),
            cols: handle_edge(self.cols.0, self.cols.1, shape.1),
        }
    }

    /// [`fit_to`](Self::fit_to), refusing windows more than `drift` pixels
    /// away from `shape` on either axis.
    pub fn reconcile(self, shape: (usize, usize), drift: usize) -> SatmapResult<Self> {
        check_drift(shape, self.extent(), drift)?;
        Ok(self.fit_to(shape))
    }
}

/// Fail with `ShapeMismatch` when `actual` is more than `drift` pixels from
/// `expected` on either axis.
pub fn check_drift(expected: (usize, usize), actual: (usize, usize), drift: usize) -> SatmapResult<()> {
    if expected.0.abs_diff(actual.0) > drift || expected.1.abs_diff(actual.1) > drift {
        return Err(SatmapError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Correct off-by-one drift between a rounded window and the pixel count it
/// must hold.
///
/// When the window is the wrong length, a positive start is moved so the end
/// stays put; otherwise the end is moved.
pub fn handle_edge(start: isize, end: isize, len: usize) -> (isize, isize) {
    let len = len as isize;
    if end - start == len {
        return (start, end);
    }
    if start > 0 {
        (end - len, end)
    } else {
        (start, start + len)
    }
}

/// Copy `src` into `dest` with its top-left corner at the window start.
///
/// Anything falling outside `dest` is clipped, so a paste never writes out of
/// bounds. Later pastes overwrite earlier ones.
pub fn paste(dest: &mut Array2<f64>, src: ArrayView2<'_, f64>, window: Window) {
    let (dest_rows, dest_cols) = dest.dim();
    let (src_rows, src_cols) = src.dim();

    let (r0, r1) = clip(window.rows.0, src_rows, dest_rows);
    let (c0, c1) = clip(window.cols.0, src_cols, dest_cols);
    if r0 >= r1 || c0 >= c1 {
        warn!(?window, dest = ?(dest_rows, dest_cols), "Paste window lies outside destination");
        return;
    }

    if (r1 - r0, c1 - c0) != (src_rows, src_cols) {
        warn!(
            ?window,
            src = ?(src_rows, src_cols),
            dest = ?(dest_rows, dest_cols),
            "Clipping paste window to destination"
        );
    }

    let sr0 = (r0 as isize - window.rows.0) as usize;
    let sc0 = (c0 as isize - window.cols.0) as usize;
    dest.slice_mut(s![r0..r1, c0..c1])
        .assign(&src.slice(s![sr0..sr0 + (r1 - r0), sc0..sc0 + (c1 - c0)]));
}

/// Destination range `[lo, hi)` for `len` items starting at `start`.
fn clip(start: isize, len: usize, bound: usize) -> (usize, usize) {
    let lo = start.max(0);
    let hi = (start + len as isize).min(bound as isize);
    (lo as usize, hi.max(lo) as usize)
}
