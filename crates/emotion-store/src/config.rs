//! Configuration loading for the emotion store.
//!
//! Store settings can be built in code or loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Strength given to emotions registered without an explicit value.
pub const DEFAULT_EMOTION_VALUE: f32 = 0.5;

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial default value for registrations without an explicit value
    pub default_value: f32,
    /// What happens to incoming relations when an id is registered again
    pub reregister: ReregisterPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_value: DEFAULT_EMOTION_VALUE,
            reregister: ReregisterPolicy::Detach,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_default_value(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_reregister(mut self, policy: ReregisterPolicy) -> Self {
        self.reregister = policy;
        self
    }
}

/// Handling of relations that point at an id when that id is registered
/// again.
///
/// In both cases the replaced record's own outgoing relations are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReregisterPolicy {
    /// Incoming relations stay bound to the replaced record and stop
    /// having any visible effect
    #[default]
    Detach,
    /// Incoming relations are rebound to the new record
    Redirect,
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Emotion Store Configuration

# Strength assigned to emotions registered without an explicit value
default_value = 0.5

# "detach" or "redirect"
reregister = "detach"
"#
    .to_string()
}
