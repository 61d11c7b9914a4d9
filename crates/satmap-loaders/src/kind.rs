//! Container kinds and archive file names.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, LoaderResult};

/// The on-disk container an archive file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// JSON metadata plus an `.npy` array.
    Zip,
    /// Metadata attributes on the first group, array in its `data` dataset.
    Hdf5,
    /// YAML tree with an ndarray node and binary blocks.
    Asdf,
}

impl ContainerKind {
    /// Resolve a container from a file extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> LoaderResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "zip" => Ok(ContainerKind::Zip),
            "hdf5" | "h5" => Ok(ContainerKind::Hdf5),
            "asdf" => Ok(ContainerKind::Asdf),
            other => Err(LoaderError::UnsupportedContainer(format!(
                "'.{}' is not one of .zip, .hdf5, .h5, .asdf",
                other
            ))),
        }
    }

    /// Resolve a container from a path's extension.
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            LoaderError::UnsupportedContainer(format!("{} has no file extension", path.display()))
        })?;
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ContainerKind::Zip => "zip",
            ContainerKind::Hdf5 => "hdf5",
            ContainerKind::Asdf => "asdf",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A parsed archive file name: `aigean_<ins>_<YYYYMMDD>_<HHMMSS>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFileName {
    pub observatory: String,
    /// Three-letter instrument code, lower case.
    pub instrument_code: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    pub kind: ContainerKind,
}

impl ArchiveFileName {
    /// Full instrument name for known codes.
    pub fn instrument_name(&self) -> Option<&'static str> {
        match self.instrument_code.as_str() {
            "lir" => Some("Lir"),
            "man" => Some("Manannan"),
            "fan" => Some("Fand"),
            "ecn" => Some("Ecne"),
            _ => None,
        }
    }
}

/// Parse an archive file name such as `aigean_fan_20221205_191610.zip`.
///
/// Only the final path component is examined.
pub fn parse_capture_filename(name: &str) -> LoaderResult<ArchiveFileName> {
    let path = Path::new(name);
    let kind = ContainerKind::from_path(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| invalid_name(name, "no file stem"))?;

    let parts: Vec<&str> = stem.split('_').collect();
    let [observatory, code, date, time] = parts.as_slice() else {
        return Err(invalid_name(name, "expected 4 underscore-separated fields"));
    };

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid_name(name, "instrument code must be 3 letters"));
    }
    if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid_name(name, "date must be YYYYMMDD"));
    }
    if time.len() != 6 || !time.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid_name(name, "time must be HHMMSS"));
    }

    Ok(ArchiveFileName {
        observatory: observatory.to_ascii_lowercase(),
        instrument_code: code.to_ascii_lowercase(),
        date: format!("{}-{}-{}", &date[0..4], &date[4..6], &date[6..8]),
        time: format!("{}:{}:{}", &time[0..2], &time[2..4], &time[4..6]),
        kind,
    })
}

fn invalid_name(name: &str, reason: &str) -> LoaderError {
    LoaderError::InvalidFormat(format!("'{}' is not an archive file name: {}", name, reason))
}
