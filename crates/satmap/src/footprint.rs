//! Ground footprints and the overlap predicate.

use serde::{Deserialize, Serialize};

use crate::error::{SatmapError, SatmapResult};
use crate::transform;

/// The axis-aligned ground rectangle a raster covers, plus its resolution.
///
/// Resolution is ground units per pixel and applies to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub resolution: f64,
}

impl Footprint {
    /// Create a validated footprint from its x range, y range and resolution.
    pub fn new(xcoords: (f64, f64), ycoords: (f64, f64), resolution: f64) -> SatmapResult<Self> {
        let footprint = Self {
            min_x: xcoords.0,
            max_x: xcoords.1,
            min_y: ycoords.0,
            max_y: ycoords.1,
            resolution,
        };
        footprint.validate()?;
        Ok(footprint)
    }

    /// Check the footprint invariants.
    pub fn validate(&self) -> SatmapResult<()> {
        let values = [self.min_x, self.max_x, self.min_y, self.max_y, self.resolution];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SatmapError::InvalidFootprint(format!(
                "non-finite value in {:?}",
                self
            )));
        }
        if self.min_x >= self.max_x {
            return Err(SatmapError::InvalidFootprint(format!(
                "xcoords ({}, {}) must be increasing",
                self.min_x, self.max_x
            )));
        }
        if self.min_y >= self.max_y {
            return Err(SatmapError::InvalidFootprint(format!(
                "ycoords ({}, {}) must be increasing",
                self.min_y, self.max_y
            )));
        }
        if self.resolution <= 0.0 {
            return Err(SatmapError::InvalidFootprint(format!(
                "resolution {} must be positive",
                self.resolution
            )));
        }
        Ok(())
    }

    pub fn xcoords(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    pub fn ycoords(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    /// Ground extent as `(width, height)`.
    pub fn field_of_view(&self) -> (f64, f64) {
        (self.max_x - self.min_x, self.max_y - self.min_y)
    }

    /// Ground centre as `(x, y)`.
    pub fn centre(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Same rectangle at a different resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self { resolution, ..*self }
    }

    /// Check if a point lies inside or on the edge of this footprint.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if this footprint overlaps another; touching edges do not count.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        overlaps(self, other)
    }

    /// Bounding box of both footprints, at this footprint's resolution.
    pub fn union(&self, other: &Footprint) -> Footprint {
        Footprint {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            resolution: self.resolution,
        }
    }

    /// Shared rectangle of both footprints, at this footprint's resolution.
    pub fn intersection(&self, other: &Footprint) -> Option<Footprint> {
        if !self.overlaps(other) {
            return None;
        }

        Some(Footprint {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
            resolution: self.resolution,
        })
    }

    /// Ground point to `(row, col)`; see [`transform::to_pixel`].
    pub fn to_pixel(&self, x: f64, y: f64) -> SatmapResult<(usize, usize)> {
        transform::to_pixel(self, x, y)
    }

    /// Pixel to ground point; see [`transform::to_ground`].
    pub fn to_ground(&self, row: usize, col: usize) -> (f64, f64) {
        transform::to_ground(self, row, col)
    }

    /// Number of `(rows, cols)` the footprint spans at its resolution.
    pub fn pixel_extent(&self) -> (usize, usize) {
        transform::pixel_index(self, self.max_x, self.min_y)
    }
}

/// Axis-aligned rectangle intersection test.
///
/// False when the rectangles are disjoint on either axis. Rectangles that only
/// share an edge are not overlapping.
pub fn overlaps(a: &Footprint, b: &Footprint) -> bool {
    !(a.max_x <= b.min_x || a.min_x >= b.max_x || a.max_y <= b.min_y || a.min_y >= b.max_y)
}
