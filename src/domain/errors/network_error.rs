//! Transport error types.

use thiserror::Error;

/// Errors surfaced by the transport and the photo provider.
///
/// `Clone` so a single in-flight fetch can hand the same error to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum NetworkError {
    #[error("request timed out")]
    Timeout,

    #[error("connection lost")]
    ConnectionLost,

    #[error("server responded with status {code}")]
    BadStatus { code: u16 },

    #[error("failed to decode response: {message}")]
    DecodeFailure { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl NetworkError {
    /// Creates bad status error.
    #[must_use]
    pub const fn bad_status(code: u16) -> Self {
        Self::BadStatus { code }
    }

    /// Creates decode failure error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns whether the device looks offline rather than the server failing.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Timeout | Self::ConnectionLost)
    }
}
