//! Configuration for rendering.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::colormap::Colormap;

/// Where and how rendered rasters are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub colormap: Colormap,

    /// Directory PNG files are written to.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("AIGEAN_COLORMAP") {
            match val.parse() {
                Ok(colormap) => config.colormap = colormap,
                Err(e) => warn!(error = %e, "Ignoring AIGEAN_COLORMAP"),
            }
        }

        if let Ok(val) = std::env::var("AIGEAN_OUTPUT_DIR") {
            if !val.is_empty() {
                config.output_dir = PathBuf::from(val);
            }
        }

        config
    }
}
