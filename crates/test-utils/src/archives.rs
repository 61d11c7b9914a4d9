//! Archive files written from rasters, for tests that read from disk.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use ndarray_npy::WriteNpyExt;
use satmap::Raster;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A `.zip` archive holding the raster's metadata as JSON and its data as `.npy`.
///
/// # Panics
///
/// Panics if encoding fails, which only happens on allocation failure.
pub fn zip_capture_bytes(raster: &Raster) -> Vec<u8> {
    let mut npy = Vec::new();
    raster.data().write_npy(&mut npy).expect("npy encoding");
    let json = serde_json::to_vec(raster.metadata()).expect("metadata encoding");

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("metadata.json", options).expect("zip entry");
    writer.write_all(&json).expect("zip write");
    writer.start_file("data.npy", options).expect("zip entry");
    writer.write_all(&npy).expect("zip write");
    writer.finish().expect("zip finish").into_inner()
}

/// Write [`zip_capture_bytes`] to `dir/name` and return the path.
pub fn write_zip_capture(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, zip_capture_bytes(raster)).expect("write capture");
    path
}
