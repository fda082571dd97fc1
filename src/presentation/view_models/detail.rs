//! Single photo screen.

use std::sync::Arc;

use crate::application::services::{FavouriteChanges, FavouritesStore};
use crate::domain::entities::{Photo, PhotoId};

/// Full-size photo with a favourite toggle.
pub struct PhotoDetailViewModel {
    photo: Photo,
    favourites: Arc<FavouritesStore>,
    changes: FavouriteChanges,
    is_favourite: bool,
}

impl PhotoDetailViewModel {
    #[must_use]
    pub fn new(photo: Photo, favourites: Arc<FavouritesStore>) -> Self {
        let changes = favourites.changes();
        Self {
            photo,
            favourites,
            changes,
            is_favourite: false,
        }
    }

    #[must_use]
    pub const fn photo(&self) -> &Photo {
        &self.photo
    }

    #[must_use]
    pub const fn is_favourite(&self) -> bool {
        self.is_favourite
    }

    /// URL of the full-size image.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.photo.big_image_url()
    }

    /// Reads the favourite status from the store.
    pub async fn check_favourite_status(&mut self) {
        self.is_favourite = self.favourites.is_favourite(self.photo.id()).await;
    }

    /// Flips the displayed status and writes it through.
    pub async fn toggle_favourite(&mut self) {
        if self.is_favourite {
            self.favourites.remove(self.photo.id()).await;
        } else {
            self.favourites.add(self.photo.id()).await;
        }
        self.is_favourite = !self.is_favourite;
    }

    /// Applies queued changes for this photo; other ids are ignored.
    pub async fn apply_pending_changes(&mut self) -> usize {
        let mut relevant = 0;
        while let Some(photo_id) = self.changes.try_recv() {
            if photo_id == *self.photo.id() {
                relevant += 1;
            }
        }
        if relevant > 0 {
            self.check_favourite_status().await;
        }
        relevant
    }

    /// Waits for the next change to this photo and applies it.
    pub async fn next_change(&mut self) -> Option<PhotoId> {
        loop {
            let photo_id = self.changes.recv().await?;
            if photo_id == *self.photo.id() {
                self.check_favourite_status().await;
                return Some(photo_id);
            }
        }
    }
}

impl std::fmt::Debug for PhotoDetailViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoDetailViewModel")
            .field("photo", &self.photo.id())
            .field("is_favourite", &self.is_favourite)
            .finish_non_exhaustive()
    }
}
