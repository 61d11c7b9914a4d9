//! Common raster fixtures.
//!
//! Footprints are shaped like Aigean archive captures so that tests read
//! like the scenarios they model.

use ndarray::Array2;
use satmap::{Metadata, Raster};

use crate::generators::create_test_grid;

/// Ground footprints `(xcoords, ycoords, resolution)`.
pub mod footprint {
    /// Fand capture of 2022-12-05 19:16:10.
    pub const FAND_191610: ((f64, f64), (f64, f64), f64) = ((75.0, 300.0), (450.0, 500.0), 5.0);

    /// Fand capture of 2022-12-05 19:22:10.
    pub const FAND_192210: ((f64, f64), (f64, f64), f64) = ((300.0, 525.0), (50.0, 100.0), 5.0);

    /// Lir-sized capture, coarse resolution.
    pub const LIR: ((f64, f64), (f64, f64), f64) = ((500.0, 1100.0), (200.0, 500.0), 30.0);

    /// Manannan capture of 2022-12-05 19:45:10.
    pub const MAN_194510: ((f64, f64), (f64, f64), f64) = ((750.0, 1200.0), (200.0, 400.0), 15.0);
}

/// Metadata for a synthetic capture.
pub fn fixture_metadata(
    instrument: &str,
    date: &str,
    xcoords: (f64, f64),
    ycoords: (f64, f64),
    resolution: f64,
) -> Metadata {
    Metadata {
        instrument: instrument.to_string(),
        observatory: "Aigean".to_string(),
        resolution,
        time: "19:16:10".to_string(),
        date: date.to_string(),
        xcoords,
        ycoords,
        archive: "ISA".to_string(),
    }
}

/// Raster with explicit data, built from metadata fields.
///
/// # Panics
///
/// Panics if the fixture is invalid; fixtures are expected to be correct.
pub fn raster_from_data(
    instrument: &str,
    date: &str,
    xcoords: (f64, f64),
    ycoords: (f64, f64),
    resolution: f64,
    data: Array2<f64>,
) -> Raster {
    Raster::from_parts(
        fixture_metadata(instrument, date, xcoords, ycoords, resolution),
        data,
    )
    .expect("invalid raster fixture")
}

/// Raster whose data is a [`create_test_grid`] sized to fit its footprint.
pub fn fixture_raster(
    instrument: &str,
    date: &str,
    xcoords: (f64, f64),
    ycoords: (f64, f64),
    resolution: f64,
) -> Raster {
    let rows = ((ycoords.1 - ycoords.0) / resolution).round() as usize;
    let cols = ((xcoords.1 - xcoords.0) / resolution).round() as usize;
    raster_from_data(
        instrument,
        date,
        xcoords,
        ycoords,
        resolution,
        create_test_grid(rows, cols),
    )
}
