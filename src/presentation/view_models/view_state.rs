use crate::application::services::CatalogSnapshot;

use super::ErrorViewModel;

/// What a photo list screen shows.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// Waiting for the catalog.
    #[default]
    Loading,
    /// Photos to display, never empty.
    Ready {
        /// Photos in display order.
        photos: CatalogSnapshot,
    },
    /// Loaded, nothing to show.
    Empty,
    /// Load failed; the banner offers a retry.
    Error(ErrorViewModel),
}

impl ViewState {
    /// Returns true while waiting for the catalog.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Photos on screen, empty unless ready.
    #[must_use]
    pub fn photos(&self) -> &[crate::domain::entities::Photo] {
        match self {
            Self::Ready { photos } => &photos[..],
            _ => &[],
        }
    }

    /// Error banner, if the load failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorViewModel> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl PartialEq for ViewState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Loading, Self::Loading) | (Self::Empty, Self::Empty) => true,
            (Self::Ready { photos: a }, Self::Ready { photos: b }) => a[..] == b[..],
            (Self::Error(a), Self::Error(b)) => a == b,
            _ => false,
        }
    }
}
