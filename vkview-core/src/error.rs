//! Error types for VKView

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for VKView operations
#[derive(Error, Debug)]
pub enum VkViewError {
    /// Configuration file is absent
    #[error("Config file not found: {}", .0.display())]
    MissingConfig(PathBuf),

    /// Invalid configuration contents
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse errors
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for VKView operations
pub type Result<T> = std::result::Result<T, VkViewError>;

impl From<serde_json::Error> for VkViewError {
    fn from(err: serde_json::Error) -> Self {
        VkViewError::Serialization(err.to_string())
    }
}
