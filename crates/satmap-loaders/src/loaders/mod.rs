//! One loader per container kind, behind the [`Loader`] trait.

mod asdf_loader;
#[cfg(feature = "hdf5")]
mod hdf5_loader;
mod zip_loader;

pub use asdf_loader::AsdfLoader;
#[cfg(feature = "hdf5")]
pub use hdf5_loader::Hdf5Loader;
pub use zip_loader::ZipLoader;

use ndarray::ArrayD;
use satmap::Metadata;

use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::kind::ContainerKind;

/// Reads one archive container from its raw bytes.
///
/// The array is returned with whatever dimensionality the container held;
/// callers decide whether it is a usable raster.
pub trait Loader: Send + Sync {
    fn kind(&self) -> ContainerKind;

    fn load(&self, bytes: &[u8]) -> LoaderResult<(Metadata, ArrayD<f64>)>;
}

/// The loader for `kind`.
///
/// Fails with `UnsupportedContainer` for HDF5 when built without the `hdf5`
/// feature.
pub fn loader_for(kind: ContainerKind, config: &LoaderConfig) -> LoaderResult<Box<dyn Loader>> {
    match kind {
        ContainerKind::Zip => Ok(Box::new(ZipLoader::new(config.clone()))),
        ContainerKind::Asdf => Ok(Box::new(AsdfLoader::new(config.clone()))),
        #[cfg(feature = "hdf5")]
        ContainerKind::Hdf5 => Ok(Box::new(Hdf5Loader::new(config.clone()))),
        #[cfg(not(feature = "hdf5"))]
        ContainerKind::Hdf5 => Err(LoaderError::UnsupportedContainer(
            "hdf5 support is not compiled in (enable the `hdf5` feature)".to_string(),
        )),
    }
}
