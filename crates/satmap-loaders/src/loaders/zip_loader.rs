//! Zip archives: a JSON metadata document followed by an `.npy` array.

use std::io::{Cursor, Read};

use ndarray::ArrayD;
use ndarray_npy::{ReadNpyError, ReadNpyExt};
use satmap::Metadata;
use serde_json::Value;
use tracing::debug;
use zip::ZipArchive;

use super::Loader;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::kind::ContainerKind;
use crate::record::{as_record, parse_metadata};

/// Reads `.zip` archive files.
///
/// The first member is the metadata document and the second the array,
/// regardless of their names.
#[derive(Debug, Clone, Default)]
pub struct ZipLoader {
    config: LoaderConfig,
}

impl ZipLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }
}

impl Loader for ZipLoader {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Zip
    }

    fn load(&self, bytes: &[u8]) -> LoaderResult<(Metadata, ArrayD<f64>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        if archive.len() < 2 {
            return Err(LoaderError::InvalidFormat(format!(
                "zip archive holds {} member(s), expected metadata and data",
                archive.len()
            )));
        }

        let document = read_member(&mut archive, 0)?;
        let value: Value = serde_json::from_slice(&document)?;
        let metadata = parse_metadata(as_record(&value)?, &self.config)?;

        let payload = read_member(&mut archive, 1)?;
        let data = read_npy_any(&payload)?;

        debug!(
            members = archive.len(),
            shape = ?data.shape(),
            instrument = %metadata.instrument,
            "Loaded zip archive"
        );
        Ok((metadata, data))
    }
}

fn read_member(archive: &mut ZipArchive<Cursor<&[u8]>>, index: usize) -> LoaderResult<Vec<u8>> {
    let mut member = archive.by_index(index)?;
    let mut buf = Vec::with_capacity(member.size() as usize);
    member.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Read an `.npy` payload of float64, float32, int64 or int32 as f64.
fn read_npy_any(bytes: &[u8]) -> LoaderResult<ArrayD<f64>> {
    match ArrayD::<f64>::read_npy(bytes) {
        Ok(data) => return Ok(data),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(e.into()),
    }
    if let Ok(data) = ArrayD::<f32>::read_npy(bytes) {
        return Ok(data.mapv(f64::from));
    }
    if let Ok(data) = ArrayD::<i64>::read_npy(bytes) {
        return Ok(data.mapv(|v| v as f64));
    }
    if let Ok(data) = ArrayD::<i32>::read_npy(bytes) {
        return Ok(data.mapv(f64::from));
    }
    Err(LoaderError::InvalidFormat(
        "npy payload is not float64, float32, int64 or int32".to_string(),
    ))
}
