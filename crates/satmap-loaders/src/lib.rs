//! Readers for Aigean archive files.
//!
//! Archive captures come in three containers, resolved from the file
//! extension:
//!
//! | extension | container | metadata | array |
//! |---|---|---|---|
//! | `.zip` | zip archive | first member, JSON | second member, `.npy` |
//! | `.asdf` | ASDF | YAML tree keys | `data` ndarray node |
//! | `.hdf5`, `.h5` | HDF5 (feature `hdf5`) | first group attributes | `data` dataset |
//!
//! # Example
//!
//! ```ignore
//! use satmap_loaders::{open_raster, LoaderConfig};
//!
//! let raster = open_raster("aigean_fan_20221205_191610.zip", &LoaderConfig::default())?;
//! println!("{:?}", raster.centre());
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod loaders;
pub mod record;

pub use config::LoaderConfig;
pub use error::{LoaderError, LoaderResult};
pub use kind::{parse_capture_filename, ArchiveFileName, ContainerKind};
pub use loaders::{loader_for, AsdfLoader, Loader, ZipLoader};
#[cfg(feature = "hdf5")]
pub use loaders::Hdf5Loader;
pub use record::parse_metadata;

use std::path::Path;

use satmap::Raster;
use tracing::{debug, instrument};

/// Read an archive file into a [`Raster`].
///
/// The container is chosen from the file extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_raster(path: impl AsRef<Path>, config: &LoaderConfig) -> LoaderResult<Raster> {
    let path = path.as_ref();
    let kind = ContainerKind::from_path(path)?;

    let size = std::fs::metadata(path)?.len();
    let limit = config.max_file_size_bytes();
    if size > limit {
        return Err(LoaderError::FileTooLarge { size, limit });
    }

    let bytes = std::fs::read(path)?;
    debug!(%kind, size, "Read archive file");
    load_raster(&bytes, kind, config)
}

/// Decode an in-memory archive file of a known container kind.
pub fn load_raster(bytes: &[u8], kind: ContainerKind, config: &LoaderConfig) -> LoaderResult<Raster> {
    let loader = loader_for(kind, config)?;
    let (metadata, data) = loader.load(bytes)?;
    let shape = match data.shape() {
        &[rows, cols] => (rows, cols),
        // Rejected by Raster::from_dyn with a dimensionality error.
        _ => (0, 0),
    };
    Ok(Raster::from_dyn(metadata, data, shape)?)
}
