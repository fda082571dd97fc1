//! Favourite change notification bus.
//!
//! Every `add`/`remove` on the favourites store publishes the affected photo
//! id here. Handlers run synchronously on the publishing task in
//! registration order, so each subscriber sees events in mutation order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::PhotoId;

/// Callback invoked with the id of each changed photo.
pub type FavouriteHandler = Arc<dyn Fn(&PhotoId) + Send + Sync>;

type HandlerList = RwLock<Vec<(u64, FavouriteHandler)>>;

/// Observer list for favourite status changes.
pub struct FavouriteEventBus {
    handlers: Arc<HandlerList>,
    next_id: AtomicU64,
}

impl FavouriteEventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers a handler. Delivery stops when the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&PhotoId) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.write().push((id, Arc::new(handler)));
        trace!(subscription = id, "Favourite subscriber registered");

        Subscription {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Registers a subscriber that forwards ids into a channel.
    #[must_use]
    pub fn channel(&self) -> FavouriteChanges {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |photo_id| {
            let _ = tx.send(photo_id.clone());
        });

        FavouriteChanges {
            rx,
            _subscription: subscription,
        }
    }

    /// Delivers `photo_id` to every current subscriber.
    pub fn publish(&self, photo_id: &PhotoId) {
        // Handlers may subscribe or unsubscribe while running.
        let handlers: Vec<FavouriteHandler> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        trace!(photo_id = %photo_id, subscribers = handlers.len(), "Publishing favourite change");

        for handler in handlers {
            handler(photo_id);
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for FavouriteEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FavouriteEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavouriteEventBus")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Handle for a registered favourite handler.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    handlers: Weak<HandlerList>,
}

impl Subscription {
    /// Stops delivery to this subscriber.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers.write().retain(|(id, _)| *id != self.id);
            trace!(subscription = self.id, "Favourite subscriber removed");
        }
    }
}

/// Channel-backed favourite subscription for event-loop consumers.
#[derive(Debug)]
pub struct FavouriteChanges {
    rx: mpsc::UnboundedReceiver<PhotoId>,
    _subscription: Subscription,
}

impl FavouriteChanges {
    /// Waits for the next changed photo id.
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<PhotoId> {
        self.rx.recv().await
    }

    /// Returns the next queued change without waiting.
    pub fn try_recv(&mut self) -> Option<PhotoId> {
        self.rx.try_recv().ok()
    }
}
