//! Capture metadata.

use serde::{Deserialize, Serialize};

use crate::error::SatmapResult;
use crate::footprint::Footprint;

/// The metadata keys every capture carries, in archive order.
pub const METADATA_KEYS: [&str; 8] = [
    "instrument",
    "observatory",
    "resolution",
    "time",
    "date",
    "xcoords",
    "ycoords",
    "archive",
];

/// Fixed-shape metadata record attached to a raster.
///
/// Operators never mutate an input's metadata; they copy it and override the
/// footprint fields with [`Metadata::with_footprint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub instrument: String,
    pub observatory: String,
    pub resolution: f64,
    pub time: String,
    pub date: String,
    pub xcoords: (f64, f64),
    pub ycoords: (f64, f64),
    pub archive: String,
}

impl Metadata {
    /// The validated footprint described by this record.
    pub fn footprint(&self) -> SatmapResult<Footprint> {
        Footprint::new(self.xcoords, self.ycoords, self.resolution)
    }

    /// Copy of this record with only the footprint fields replaced.
    pub fn with_footprint(&self, footprint: &Footprint) -> Self {
        Self {
            resolution: footprint.resolution,
            xcoords: footprint.xcoords(),
            ycoords: footprint.ycoords(),
            ..self.clone()
        }
    }

    /// True when both records describe the same instrument on the same date.
    pub fn same_capture_day(&self, other: &Metadata) -> bool {
        self.date == other.date && self.instrument == other.instrument
    }
}
