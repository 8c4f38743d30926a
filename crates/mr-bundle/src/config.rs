use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::guard::DEFAULT_STALL_THRESHOLD;
use crate::key::KeyPath;
use crate::BundleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Property holding the external identifier.
    pub key: String,
    /// Treat `key` as a JSON pointer into `properties` instead of a plain name.
    pub pointer: bool,
    pub stall_threshold: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            key: "id".to_string(),
            pointer: false,
            stall_threshold: DEFAULT_STALL_THRESHOLD,
        }
    }
}

impl BundleConfig {
    pub fn from_toml(content: &str) -> Result<Self, BundleError> {
        let config: BundleConfig =
            toml::from_str(content).map_err(|e| BundleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, BundleError> {
        toml::to_string_pretty(self).map_err(|e| BundleError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), BundleError> {
        if self.key.is_empty() {
            return Err(BundleError::Config("key must not be empty".into()));
        }
        if self.stall_threshold == 0 {
            return Err(BundleError::Config("stall_threshold must be at least 1".into()));
        }
        Ok(())
    }

    pub fn key_path(&self) -> Result<KeyPath, BundleError> {
        if self.pointer {
            KeyPath::pointer(&self.key)
        } else {
            Ok(KeyPath::name(self.key.clone()))
        }
    }
}
