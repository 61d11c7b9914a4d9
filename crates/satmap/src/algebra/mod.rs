//! The binary raster operators.

pub mod difference;
pub mod mosaic;
pub mod stitch;
pub mod window;

pub use difference::difference;
pub use mosaic::{fold_mosaic, mosaic, mosaic_with, parse_padding, parse_resolution, MosaicOptions};
pub use stitch::stitch;
pub use window::{handle_edge, Window};
