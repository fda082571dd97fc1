//! Per-view image loading with cancellation.
//!
//! Each displayed image owns one `ImageLoader`. Starting a new load cancels
//! the previous one; a cancelled load never touches the cache or the
//! loader's observable state, whichever network response arrives first.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::domain::entities::{ImageSource, ImageStatus, PhotoImage};
use crate::domain::ports::{ImageCachePort, ImageFetchPort};

#[derive(Debug, Default)]
struct LoaderState {
    image: Option<Arc<PhotoImage>>,
    status: ImageStatus,
}

/// Loads one image at a time from the shared cache or the network.
pub struct ImageLoader {
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetchPort>,
    generation: watch::Sender<u64>,
    state: RwLock<LoaderState>,
}

impl ImageLoader {
    /// Creates an idle loader.
    #[must_use]
    pub fn new(cache: Arc<dyn ImageCachePort>, fetcher: Arc<dyn ImageFetchPort>) -> Self {
        Self {
            cache,
            fetcher,
            generation: watch::Sender::new(0),
            state: RwLock::new(LoaderState::default()),
        }
    }

    /// The image from the last completed load, if any.
    #[must_use]
    pub fn image(&self) -> Option<Arc<PhotoImage>> {
        self.state.read().image.clone()
    }

    #[must_use]
    pub fn status(&self) -> ImageStatus {
        self.state.read().status.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    /// Loads the image at `url`, cancelling any load already in flight.
    ///
    /// A `None` url only cancels. Returns `None` when the load was
    /// cancelled or failed; the view then shows a placeholder.
    pub async fn load(&self, url: Option<&str>) -> Option<Arc<PhotoImage>> {
        let generation = self.begin();
        let url = url?;

        self.update(generation, |state| state.status = ImageStatus::Loading);

        if let Some(image) = self.cache.get(url).await {
            trace!(url = %url, "Serving image from cache");
            let status = ImageStatus::Ready(ImageSource::MemoryCache);
            return self.finish(generation, Some(image), status);
        }

        let mut cancelled = self.generation.subscribe();
        let fetched = tokio::select! {
            result = self.fetcher.fetch(url) => result,
            () = wait_superseded(&mut cancelled, generation) => {
                debug!(url = %url, "Image load cancelled during download");
                return None;
            }
        };

        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to download image");
                return self.finish(generation, None, ImageStatus::Failed(e.to_string()));
            }
        };

        let image = match decode(url, bytes).await {
            Ok(image) => Arc::new(image),
            Err(reason) => {
                warn!(url = %url, error = %reason, "Failed to decode image");
                return self.finish(generation, None, ImageStatus::Failed(reason));
            }
        };

        let still_current = || self.is_current(generation);
        let stored = self
            .cache
            .set_if(url.to_string(), Arc::clone(&image), &still_current)
            .await;
        if !stored {
            debug!(url = %url, "Discarding image from cancelled load");
            return None;
        }

        self.finish(generation, Some(image), ImageStatus::Ready(ImageSource::Network))
    }

    /// Cancels the load in flight, if any.
    pub fn cancel(&self) {
        self.begin();
    }

    fn begin(&self) -> u64 {
        let mut next = 0;
        self.generation.send_modify(|generation| {
            *generation += 1;
            next = *generation;
        });
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        *self.generation.borrow() == generation
    }

    fn update(&self, generation: u64, apply: impl FnOnce(&mut LoaderState)) -> bool {
        let mut state = self.state.write();
        // Checked under the state lock so a superseded load cannot interleave.
        if !self.is_current(generation) {
            return false;
        }
        apply(&mut state);
        true
    }

    fn finish(
        &self,
        generation: u64,
        image: Option<Arc<PhotoImage>>,
        status: ImageStatus,
    ) -> Option<Arc<PhotoImage>> {
        let applied = self.update(generation, |state| {
            if image.is_some() {
                state.image.clone_from(&image);
            }
            state.status = status;
        });
        if applied { image } else { None }
    }
}

impl Drop for ImageLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

async fn wait_superseded(rx: &mut watch::Receiver<u64>, generation: u64) {
    while *rx.borrow_and_update() == generation {
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

async fn decode(url: &str, bytes: Bytes) -> Result<PhotoImage, String> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || {
        let decoded =
            image::load_from_memory(&bytes).map_err(|e| format!("Decode failed: {e}"))?;
        Ok(PhotoImage::new(url, bytes, decoded.width(), decoded.height()))
    })
    .await
    .map_err(|e| format!("Decode task panicked: {e}"))?
}
