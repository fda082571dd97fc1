//! Favourites-only screen.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{ErrorViewModel, ViewState};
use crate::application::services::{FavouriteChanges, FavouritesStore, PhotoCatalogService};
use crate::domain::entities::{Photo, PhotoId};

/// List of favourited photos, in catalog order.
///
/// Any change event re-filters the whole catalog, since a single add or
/// remove moves a photo in or out of the list.
pub struct FavouritesViewModel {
    catalog: Arc<PhotoCatalogService>,
    favourites: Arc<FavouritesStore>,
    changes: FavouriteChanges,
    view_state: ViewState,
}

impl FavouritesViewModel {
    /// Creates the view-model and subscribes to favourite changes.
    #[must_use]
    pub fn new(catalog: Arc<PhotoCatalogService>, favourites: Arc<FavouritesStore>) -> Self {
        let changes = favourites.changes();
        Self {
            catalog,
            favourites,
            changes,
            view_state: ViewState::Loading,
        }
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Derives the list from the catalog and the current favourite ids.
    pub async fn load_favourites(&mut self) {
        match self.catalog.fetch_photos().await {
            Ok(photos) => self.show_favourites(&photos).await,
            Err(e) => {
                warn!(error = %e, "Favourites failed to load");
                self.view_state = ViewState::Error(ErrorViewModel::new(e));
            }
        }
    }

    /// Retry action: shows loading and re-derives the list.
    pub async fn refresh(&mut self) {
        self.view_state = ViewState::Loading;
        self.load_favourites().await;
    }

    /// Unfavourites `photo`. The list updates on the resulting change event.
    pub async fn remove_from_favourites(&self, photo: &Photo) {
        self.favourites.remove(photo.id()).await;
    }

    /// Applies every queued change with one re-filter; returns how many were queued.
    pub async fn apply_pending_changes(&mut self) -> usize {
        let mut pending = 0;
        while self.changes.try_recv().is_some() {
            pending += 1;
        }
        if pending > 0 {
            self.refilter().await;
        }
        pending
    }

    /// Waits for the next favourite change and re-filters.
    pub async fn next_change(&mut self) -> Option<PhotoId> {
        let photo_id = self.changes.recv().await?;
        self.refilter().await;
        Some(photo_id)
    }

    // Change events only re-filter a list already on screen; they never fetch.
    async fn refilter(&mut self) {
        if !matches!(self.view_state, ViewState::Ready { .. } | ViewState::Empty) {
            return;
        }
        if let Some(photos) = self.catalog.snapshot() {
            self.show_favourites(&photos).await;
        }
    }

    async fn show_favourites(&mut self, photos: &[Photo]) {
        let ids = self.favourites.all_ids().await;
        let favourites: Vec<Photo> = photos
            .iter()
            .filter(|photo| ids.contains(photo.id()))
            .cloned()
            .collect();

        debug!(count = favourites.len(), "Favourites filtered");
        self.view_state = if favourites.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready {
                photos: favourites.into(),
            }
        };
    }
}

impl std::fmt::Debug for FavouritesViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavouritesViewModel")
            .field("view_state", &self.view_state)
            .finish_non_exhaustive()
    }
}
