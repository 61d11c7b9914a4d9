//! Configuration for the loaders.

use serde::{Deserialize, Serialize};

/// How strictly archive files are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Require every metadata key. When false, missing text keys default to
    /// an empty string; footprint keys are required either way.
    pub strict_metadata: bool,

    /// Largest file `open_raster` will read, in megabytes.
    pub max_file_size_mb: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            strict_metadata: true,
            max_file_size_mb: 512,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("AIGEAN_STRICT_METADATA") {
            config.strict_metadata = !(val.eq_ignore_ascii_case("false") || val == "0");
        }

        if let Ok(val) = std::env::var("AIGEAN_MAX_FILE_MB") {
            if let Ok(size) = val.parse() {
                config.max_file_size_mb = size;
            }
        }

        config
    }

    /// Lenient metadata handling, as older archive files need.
    pub fn lenient() -> Self {
        Self {
            strict_metadata: false,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size_mb == 0 {
            return Err("max_file_size_mb must be > 0".to_string());
        }
        Ok(())
    }

    /// Get the file size limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}
