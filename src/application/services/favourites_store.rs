//! Durable, observable set of favourited photo ids.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::favourite_events::{FavouriteChanges, FavouriteEventBus, Subscription};
use crate::domain::entities::{FavouriteRecord, PhotoId};
use crate::domain::ports::{RecordFilter, RecordStorePort};

/// Favourites backed by a record store.
///
/// Mutations write through before returning and publish one change event per
/// call. Storage failures are logged and degrade to "not favourite".
pub struct FavouritesStore {
    records: Arc<dyn RecordStorePort>,
    events: FavouriteEventBus,
    write_lock: Mutex<()>,
}

impl FavouritesStore {
    /// Creates a store over the given record store.
    #[must_use]
    pub fn new(records: Arc<dyn RecordStorePort>) -> Self {
        Self {
            records,
            events: FavouriteEventBus::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Marks a photo as favourite. Adding twice keeps a single record.
    pub async fn add(&self, photo_id: &PhotoId) {
        let _guard = self.write_lock.lock().await;
        let filter = RecordFilter::PhotoId(photo_id.clone());

        match self.records.count(Some(&filter)).await {
            Ok(0) => {
                if let Err(e) = self.records.insert(FavouriteRecord::new(photo_id.clone())).await {
                    warn!(photo_id = %photo_id, error = %e, "Failed to persist favourite");
                } else {
                    debug!(photo_id = %photo_id, "Added favourite");
                }
            }
            Ok(_) => debug!(photo_id = %photo_id, "Photo already favourited"),
            Err(e) => warn!(photo_id = %photo_id, error = %e, "Failed to read favourites"),
        }

        self.events.publish(photo_id);
    }

    /// Unmarks a photo. Removing an absent id is a no-op.
    pub async fn remove(&self, photo_id: &PhotoId) {
        let _guard = self.write_lock.lock().await;
        let filter = RecordFilter::PhotoId(photo_id.clone());

        match self.records.delete(&filter).await {
            Ok(removed) => debug!(photo_id = %photo_id, removed, "Removed favourite"),
            Err(e) => warn!(photo_id = %photo_id, error = %e, "Failed to delete favourite"),
        }

        self.events.publish(photo_id);
    }

    /// Flips the favourite status and returns the new status.
    pub async fn toggle(&self, photo_id: &PhotoId) -> bool {
        if self.is_favourite(photo_id).await {
            self.remove(photo_id).await;
            false
        } else {
            self.add(photo_id).await;
            true
        }
    }

    /// Returns whether the photo is currently favourited.
    pub async fn is_favourite(&self, photo_id: &PhotoId) -> bool {
        let filter = RecordFilter::PhotoId(photo_id.clone());
        match self.records.count(Some(&filter)).await {
            Ok(count) => count > 0,
            Err(e) => {
                warn!(photo_id = %photo_id, error = %e, "Failed to query favourite");
                false
            }
        }
    }

    /// Returns every favourited photo id.
    pub async fn all_ids(&self) -> HashSet<PhotoId> {
        match self.records.fetch(None).await {
            Ok(records) => records.into_iter().map(|r| r.photo_id).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to load favourites");
                HashSet::new()
            }
        }
    }

    /// Registers a change handler, called once per `add`/`remove`.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&PhotoId) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    /// Subscribes through a channel for async consumers.
    #[must_use]
    pub fn changes(&self) -> FavouriteChanges {
        self.events.channel()
    }
}

impl std::fmt::Debug for FavouritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavouritesStore")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
