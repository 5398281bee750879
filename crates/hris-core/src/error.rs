//! Error types for the HRIS client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for storage, configuration and serialization failures.
///
/// HTTP-level failures have their own type (`ApiError` in the infrastructure
/// crate) because callers need to tell network and server rejections apart.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum HrisError {
    /// A durable storage slot could not be read or written
    #[error("Storage error in slot '{slot}': {message}")]
    Storage { slot: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A built-in translation catalog failed to parse
    #[error("Catalog error for '{language}': {message}")]
    Catalog { language: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HrisError {
    /// Creates a Storage error for the given slot
    pub fn storage(slot: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            slot: slot.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HrisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HrisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HrisError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HrisError>`.
pub type Result<T> = std::result::Result<T, HrisError>;
