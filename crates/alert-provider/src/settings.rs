//! Loading the `alerting` section of a configuration document
//!
//! Documents are decoded straight into the typed configuration so that map
//! keys such as header names and placeholder values keep their case.

use crate::registry::AlertingConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported configuration format for {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Document did not match the expected shape
    #[error("failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Document formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            Some("toml") => Some(Format::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    alerting: AlertingConfig,
}

/// Load from a file, its format inferred from the extension
pub fn from_file(path: impl AsRef<Path>) -> Result<AlertingConfig, ConfigError> {
    let path = path.as_ref();
    let format =
        Format::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    info!("Loading alerting configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&contents, format)
}

/// Load from an in-memory document
pub fn from_str(contents: &str, format: Format) -> Result<AlertingConfig, ConfigError> {
    let document: Document = match format {
        Format::Yaml => serde_yaml::from_str(contents)?,
        Format::Toml => toml::from_str(contents)?,
    };
    Ok(document.alerting)
}
