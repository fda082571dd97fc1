//! Persistent store error types.

use thiserror::Error;

/// Errors raised by record store adapters.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to parse records: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("record store unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
