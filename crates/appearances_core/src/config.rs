//! Edit list configuration (`[[edit]]` tables in a TOML file).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::edit::RawEdit;
use crate::error::Error;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditConfig {
    #[serde(default)]
    pub edit: Vec<RawEdit>,
}

impl EditConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        let config = Self::from_toml_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), edits = config.edit.len(), "loaded edit config");
        Ok(config)
    }
}
