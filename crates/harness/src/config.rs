// SPDX-License-Identifier: MIT

//! Runner configuration document.
//!
//! A JSON document, conventionally at `spec/support/specrun.json` relative
//! to the project base directory. Every key is optional and unknown keys
//! are ignored, so one config file can serve several tool versions.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default config location relative to the project base directory.
pub const DEFAULT_CONFIG_PATH: &str = "spec/support/specrun.json";

/// Configuration load failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Recognized configuration keys.
///
/// The two stop flags keep their historical camelCase spelling; the rest
/// are snake_case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDocument {
    /// Subdirectory (relative to the project base) that anchors relative
    /// spec and helper patterns.
    #[serde(default)]
    pub spec_dir: Option<String>,

    /// Abort the current spec on its first failed expectation.
    #[serde(default, rename = "stopSpecOnExpectationFailure")]
    pub stop_spec_on_expectation_failure: Option<bool>,

    /// Abort the remaining suite on the first failed spec.
    #[serde(default, rename = "stopOnSpecFailure")]
    pub stop_on_spec_failure: Option<bool>,

    /// Randomize spec execution order.
    #[serde(default)]
    pub random: Option<bool>,

    /// Patterns for helper files, loaded before specs.
    #[serde(default)]
    pub helpers: Option<Vec<String>>,

    /// Require-hook identifiers, loaded before helpers.
    #[serde(default)]
    pub requires: Option<Vec<String>>,

    /// Patterns for spec files.
    #[serde(default)]
    pub spec_files: Option<Vec<String>>,
}

impl ConfigDocument {
    /// Parse a document from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound { path: path.to_path_buf() }
            } else {
                ConfigError::Read { path: path.to_path_buf(), source }
            }
        })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

/// Load the config document for a project.
///
/// With an explicit path, a missing file is fatal. Without one, the
/// default location is tried and its absence means "no configuration".
pub fn load_optional(
    base_dir: &Path,
    explicit: Option<&Path>,
) -> Result<Option<ConfigDocument>, ConfigError> {
    let path = base_dir.join(explicit.unwrap_or(Path::new(DEFAULT_CONFIG_PATH)));
    match ConfigDocument::from_path(&path) {
        Ok(doc) => Ok(Some(doc)),
        Err(ConfigError::NotFound { .. }) if explicit.is_none() => {
            tracing::debug!("no config file at default path {}", path.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
