//! HDF5 files: the first top-level group holds a `data` dataset and the
//! metadata as attributes.

use std::io::Write;

use hdf5::types::{TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Group};
use ndarray::ArrayD;
use satmap::Metadata;
use serde_json::{Map, Value};
use tracing::debug;

use super::Loader;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::kind::ContainerKind;
use crate::record::parse_metadata;

/// Reads `.hdf5` / `.h5` archive files.
///
/// The HDF5 library only opens files by path, so the bytes are written to a
/// temporary file that is removed once loading finishes.
#[derive(Debug, Clone, Default)]
pub struct Hdf5Loader {
    config: LoaderConfig,
}

impl Hdf5Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }
}

impl Loader for Hdf5Loader {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Hdf5
    }

    fn load(&self, bytes: &[u8]) -> LoaderResult<(Metadata, ArrayD<f64>)> {
        let mut temp = tempfile::Builder::new()
            .prefix("aigean_")
            .suffix(".hdf5")
            .tempfile()?;
        temp.write_all(bytes)?;
        temp.flush()?;

        let file = hdf5::File::open(temp.path())?;
        let names = file.member_names()?;
        let first = names
            .first()
            .ok_or_else(|| LoaderError::InvalidFormat("hdf5 file has no groups".to_string()))?;
        let group = file.group(first)?;

        let record = attributes(&group)?;
        let metadata = parse_metadata(&record, &self.config)?;
        let data = group.dataset("data")?.read_dyn::<f64>()?;

        debug!(
            group = %first,
            shape = ?data.shape(),
            instrument = %metadata.instrument,
            "Loaded hdf5 file"
        );
        Ok((metadata, data))
    }
}

/// Group attributes as a JSON object: strings, numbers and numeric pairs.
fn attributes(group: &Group) -> LoaderResult<Map<String, Value>> {
    let mut record = Map::new();
    for name in group.attr_names()? {
        let attr = group.attr(&name)?;
        match attribute_value(&attr)? {
            Some(value) => {
                record.insert(name, value);
            }
            None => debug!(attribute = %name, "Skipping attribute of unsupported type"),
        }
    }
    Ok(record)
}

fn attribute_value(attr: &Attribute) -> LoaderResult<Option<Value>> {
    let value = match attr.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => {
            Value::String(attr.read_scalar::<VarLenUnicode>()?.as_str().to_string())
        }
        TypeDescriptor::VarLenAscii => {
            Value::String(attr.read_scalar::<VarLenAscii>()?.as_str().to_string())
        }
        TypeDescriptor::Float(_) | TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
            let values = attr.read_raw::<f64>()?;
            match values.as_slice() {
                [single] => Value::from(*single),
                many => Value::Array(many.iter().map(|v| Value::from(*v)).collect()),
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}
