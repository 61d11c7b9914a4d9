//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Raster has no pixels to draw
    #[error("Cannot render an empty raster of shape {0:?}")]
    EmptyRaster((usize, usize)),

    #[error("Unknown colormap '{0}' (expected grayscale or viridis)")]
    UnknownColormap(String),
}
