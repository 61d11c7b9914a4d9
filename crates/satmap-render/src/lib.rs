//! PNG rendering for satmap rasters.
//!
//! Values are normalised between the raster's finite minimum and maximum and
//! mapped through a [`Colormap`]. Output files are named after the capture
//! they show, e.g. `Aigean_fan_20221205_191610_mosaic.png`.

pub mod colormap;
pub mod config;
pub mod error;
pub mod render;

pub use colormap::{Color, Colormap};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use render::{output_file_name, render_raster, save_png, value_range};
