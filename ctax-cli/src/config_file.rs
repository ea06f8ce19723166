//! Loading a [`FilingYearConfig`] from a TOML file.
//!
//! Rates are best written as strings so they are read exactly:
//!
//! ```toml
//! filing_year = 2025
//! standard_rate = "0.10"
//! national_rate = "0.078"
//! local_ratio_numerator = "22"
//! local_ratio_denominator = "78"
//! business_category = "fifth"
//! deemed_purchase_rate = "0.50"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ctax_core::FilingYearConfig;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parses a configuration from TOML text.
pub fn parse_config(text: &str) -> Result<FilingYearConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigFileError::Read`] if the file cannot be read and
/// [`ConfigFileError::Parse`] if it is not a valid configuration.
pub fn load_config(path: &Path) -> Result<FilingYearConfig, ConfigFileError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), filing_year = config.filing_year, "loaded configuration");
    Ok(config)
}
