//! Raster algebra for footprint-tagged satellite captures.
//!
//! A [`Raster`] pairs a 2D array of instrument readings with the ground
//! rectangle it covers and the resolution it was sampled at. Three binary
//! operators combine captures that only partially share ground:
//!
//! - [`stitch`]: union of two same-resolution rasters, later operand wins
//! - [`difference`]: pixelwise `a - b` over the overlap of two captures
//! - [`mosaic`]: rescale both onto a common resolution, then stitch
//!
//! # Architecture
//!
//! ```text
//!  Raster A ─┐                       ┌─► stitch ────────────► Raster
//!            ├─► footprint union / ──┤
//!  Raster B ─┘   intersection        ├─► difference ────────► Raster
//!                     │              │
//!               to_pixel windows     └─► rescale ─► stitch ─► Raster
//!                                                   (optional crop)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use satmap::{stitch, Metadata, Raster};
//!
//! let left = Raster::from_parts(left_meta, left_data)?;
//! let right = Raster::from_parts(right_meta, right_data)?;
//! let joined = stitch(&left, &right)?;
//! assert_eq!(joined.metadata().xcoords, (0.0, 20.0));
//! ```
//!
//! All operators are pure: inputs are borrowed, never modified, and every
//! call returns a freshly allocated raster. The union grid of a stitch or
//! mosaic is allocated in full, so callers combining captures that sit far
//! apart should bound the union area themselves.

pub mod algebra;
pub mod error;
pub mod footprint;
pub mod metadata;
pub mod raster;
pub mod resample;
pub mod transform;

// Re-export commonly used types at crate root
pub use algebra::{
    difference, fold_mosaic, mosaic, mosaic_with, parse_padding, parse_resolution, stitch,
    MosaicOptions,
};
pub use error::{ErrorClass, SatmapError, SatmapResult};
pub use footprint::{overlaps, Footprint};
pub use metadata::{Metadata, METADATA_KEYS};
pub use raster::Raster;
pub use resample::rescale;
pub use transform::{to_ground, to_pixel};
