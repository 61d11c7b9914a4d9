//! Metadata record parsing shared by every container.
//!
//! Each loader turns its native key/value store (JSON document, YAML tree,
//! HDF5 attributes) into a JSON object and hands it to [`parse_metadata`].

use satmap::Metadata;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};

/// Build a [`Metadata`] record from a container's key/value store.
///
/// `resolution`, `xcoords` and `ycoords` are always required. The text keys
/// are required only when `config.strict_metadata` is set. Unknown keys are
/// ignored.
pub fn parse_metadata(record: &Map<String, Value>, config: &LoaderConfig) -> LoaderResult<Metadata> {
    let strict = config.strict_metadata;
    Ok(Metadata {
        instrument: text_field(record, "instrument", strict)?,
        observatory: text_field(record, "observatory", strict)?,
        resolution: number_field(record, "resolution")?,
        time: text_field(record, "time", strict)?,
        date: text_field(record, "date", strict)?,
        xcoords: pair_field(record, "xcoords")?,
        ycoords: pair_field(record, "ycoords")?,
        archive: text_field(record, "archive", strict)?,
    })
}

/// The JSON object at the root of `value`.
pub(crate) fn as_record(value: &Value) -> LoaderResult<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        LoaderError::InvalidFormat("metadata document is not a key/value mapping".to_string())
    })
}

fn text_field(record: &Map<String, Value>, key: &str, strict: bool) -> LoaderResult<String> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(LoaderError::InvalidFormat(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
        None if strict => Err(LoaderError::MissingField(key.to_string())),
        None => {
            warn!(key, "Metadata key missing, defaulting to empty string");
            Ok(String::new())
        }
    }
}

fn number_field(record: &Map<String, Value>, key: &str) -> LoaderResult<f64> {
    let value = record
        .get(key)
        .ok_or_else(|| LoaderError::MissingField(key.to_string()))?;
    as_number(key, value)
}

fn pair_field(record: &Map<String, Value>, key: &str) -> LoaderResult<(f64, f64)> {
    match record.get(key) {
        None => Err(LoaderError::MissingField(key.to_string())),
        Some(Value::Array(items)) if items.len() == 2 => {
            Ok((as_number(key, &items[0])?, as_number(key, &items[1])?))
        }
        Some(other) => Err(LoaderError::InvalidFormat(format!(
            "'{}' must be a pair of numbers, got {}",
            key, other
        ))),
    }
}

fn as_number(key: &str, value: &Value) -> LoaderResult<f64> {
    value.as_f64().ok_or_else(|| {
        LoaderError::InvalidFormat(format!("'{}' must be numeric, got {}", key, value))
    })
}
