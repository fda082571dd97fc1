//! Photo grid screen.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{ErrorViewModel, ViewState};
use crate::application::services::{
    CatalogSnapshot, FavouriteChanges, FavouritesStore, PhotoCatalogService,
};
use crate::domain::entities::{Photo, PhotoId};
use crate::domain::errors::NetworkError;

/// Grid of every photo with a favourite marker per cell.
///
/// Favourite markers live in a map updated one entry per change event.
pub struct PhotoGridViewModel {
    catalog: Arc<PhotoCatalogService>,
    favourites: Arc<FavouritesStore>,
    changes: FavouriteChanges,
    view_state: ViewState,
    favourite_statuses: HashMap<PhotoId, bool>,
}

impl PhotoGridViewModel {
    /// Creates the view-model and subscribes to favourite changes.
    #[must_use]
    pub fn new(catalog: Arc<PhotoCatalogService>, favourites: Arc<FavouritesStore>) -> Self {
        let changes = favourites.changes();
        Self {
            catalog,
            favourites,
            changes,
            view_state: ViewState::Loading,
            favourite_statuses: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Returns whether the grid marks `photo_id` as favourite.
    #[must_use]
    pub fn is_favourite(&self, photo_id: &PhotoId) -> bool {
        self.favourite_statuses
            .get(photo_id)
            .copied()
            .unwrap_or(false)
    }

    /// Loads the grid from the shared catalog.
    pub async fn fetch_photo_grid(&mut self) {
        let result = self.catalog.fetch_photos().await;
        self.show(result).await;
    }

    /// Retry action: shows loading and fetches a fresh list.
    pub async fn refresh(&mut self) {
        self.view_state = ViewState::Loading;
        let result = self.catalog.refresh_photos().await;
        self.show(result).await;
    }

    async fn show(&mut self, result: Result<CatalogSnapshot, NetworkError>) {
        match result {
            Ok(photos) if photos.is_empty() => {
                debug!("Photo grid is empty");
                self.view_state = ViewState::Empty;
            }
            Ok(photos) => {
                self.load_favourite_statuses(&photos).await;
                self.view_state = ViewState::Ready { photos };
            }
            Err(e) => {
                warn!(error = %e, "Photo grid failed to load");
                self.view_state = ViewState::Error(ErrorViewModel::new(e));
            }
        }
    }

    /// Applies every queued favourite change; returns how many were applied.
    pub async fn apply_pending_changes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(photo_id) = self.changes.try_recv() {
            self.update_favourite_status(photo_id).await;
            applied += 1;
        }
        applied
    }

    /// Waits for the next favourite change and applies it.
    pub async fn next_change(&mut self) -> Option<PhotoId> {
        let photo_id = self.changes.recv().await?;
        self.update_favourite_status(photo_id.clone()).await;
        Some(photo_id)
    }

    async fn update_favourite_status(&mut self, photo_id: PhotoId) {
        let status = self.favourites.is_favourite(&photo_id).await;
        self.favourite_statuses.insert(photo_id, status);
    }

    async fn load_favourite_statuses(&mut self, photos: &[Photo]) {
        let ids = self.favourites.all_ids().await;
        self.favourite_statuses.extend(
            photos
                .iter()
                .map(|photo| (photo.id().clone(), ids.contains(photo.id()))),
        );
    }
}

impl std::fmt::Debug for PhotoGridViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoGridViewModel")
            .field("view_state", &self.view_state)
            .field("favourites", &self.favourite_statuses.len())
            .finish_non_exhaustive()
    }
}
