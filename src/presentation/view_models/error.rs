//! Error banner content for failed loads.

use crate::domain::errors::NetworkError;

/// Which banner to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request timed out or the connection dropped.
    Offline,
    /// Any other failure.
    Generic,
}

/// Error screen shown in place of a photo list.
///
/// The retry button maps to the owning view-model's `refresh`.
#[derive(Debug, Clone)]
pub struct ErrorViewModel {
    error: NetworkError,
    kind: ErrorKind,
}

impl ErrorViewModel {
    #[must_use]
    pub fn new(error: NetworkError) -> Self {
        let kind = if error.is_offline() {
            ErrorKind::Offline
        } else {
            ErrorKind::Generic
        };
        Self { error, kind }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn error(&self) -> &NetworkError {
        &self.error
    }

    #[must_use]
    pub const fn header_text(&self) -> &'static str {
        match self.kind {
            ErrorKind::Offline => "You are offline!",
            ErrorKind::Generic => "Oops!",
        }
    }

    #[must_use]
    pub const fn description_text(&self) -> &'static str {
        match self.kind {
            ErrorKind::Offline => "Please check your internet connection and try again.",
            ErrorKind::Generic => "Something wrong happened try again.",
        }
    }

    #[must_use]
    pub const fn button_title(&self) -> &'static str {
        "Retry"
    }
}

// Two banners are equal when they render the same, whatever the underlying error.
impl PartialEq for ErrorViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for ErrorViewModel {}

impl From<NetworkError> for ErrorViewModel {
    fn from(error: NetworkError) -> Self {
        Self::new(error)
    }
}
