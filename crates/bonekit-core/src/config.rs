//! Tool configuration loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::ConvertOptions;
use crate::error::ConfigError;
use crate::numbering::NumberingOptions;

/// Persistent settings for conversion and numbering.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BonekitConfig {
    #[serde(default)]
    pub convert: ConvertOptions,
    #[serde(default)]
    pub numbering: NumberingOptions,
}

impl BonekitConfig {
    /// Parses a configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
