//! Port definitions for image caching and fetching.

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::entities::PhotoImage;
use crate::domain::errors::NetworkError;

/// Port for image caching operations.
/// Implementations must be thread-safe.
#[async_trait::async_trait]
pub trait ImageCachePort: Send + Sync {
    /// Attempts to get an image from the cache, marking it recently used.
    /// Returns None if not cached.
    async fn get(&self, url: &str) -> Option<Arc<PhotoImage>>;

    /// Stores an image in the cache, evicting the least recently used entry when full.
    async fn set(&self, url: String, image: Arc<PhotoImage>);

    /// Stores an image only if `keep` still holds once the cache is locked.
    /// Returns whether the image was stored.
    async fn set_if(
        &self,
        url: String,
        image: Arc<PhotoImage>,
        keep: &(dyn Fn() -> bool + Sync),
    ) -> bool;

    /// Removes an image from the cache.
    async fn evict(&self, url: &str);

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images from the cache.
    async fn clear(&self);
}

/// Port for downloading raw image bytes.
#[async_trait::async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Downloads the body at `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, NetworkError>;
}
