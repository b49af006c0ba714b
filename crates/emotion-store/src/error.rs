//! Error types for store operations and configuration loading.

use thiserror::Error;

use crate::id::EmotionId;

/// Errors raised by [`EmotionStore`](crate::EmotionStore) operations.
///
/// The store never partially applies an operation that fails.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StoreError {
    /// The operation referenced an id that was never registered.
    #[error("invalid argument: {0} is not registered")]
    UnknownEmotion(EmotionId),
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
