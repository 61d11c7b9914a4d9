//! Error types for container loading.

use satmap::SatmapError;
use thiserror::Error;

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for reading archive containers.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed zip archive
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed JSON metadata document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed ASDF tree
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed or unsupported `.npy` payload
    #[error("NPY error: {0}")]
    Npy(#[from] ndarray_npy::ReadNpyError),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// File extension names no known container
    #[error("Unsupported container: {0}")]
    UnsupportedContainer(String),

    /// Required metadata key absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Container parsed but its content is not what an archive file holds
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// Loaded content violates a raster invariant
    #[error(transparent)]
    Satmap(#[from] SatmapError),
}

impl LoaderError {
    /// True when the file itself was unreadable rather than malformed.
    pub fn is_io(&self) -> bool {
        matches!(self, LoaderError::Io(_))
    }
}
