//! In-memory LRU image cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::PhotoImage;
use crate::domain::ports::ImageCachePort;

/// Default maximum number of images to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// In-memory LRU cache for decoded images, keyed by URL.
/// Thread-safe; shared by every image loader.
pub struct MemoryImageCache {
    cache: RwLock<LruCache<String, Arc<PhotoImage>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Returns the configured capacity.
    pub async fn capacity(&self) -> usize {
        self.cache.read().await.cap().get()
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Peeks at an image without promoting it in the LRU.
    pub async fn peek(&self, url: &str) -> Option<Arc<PhotoImage>> {
        let cache = self.cache.read().await;
        cache.peek(url).cloned()
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl std::fmt::Debug for MemoryImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImageCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl ImageCachePort for MemoryImageCache {
    async fn get(&self, url: &str) -> Option<Arc<PhotoImage>> {
        let mut cache = self.cache.write().await;
        if let Some(img) = cache.get(url) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache hit");
            Some(img.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache miss");
            None
        }
    }

    async fn set(&self, url: String, image: Arc<PhotoImage>) {
        let mut cache = self.cache.write().await;
        debug!(url = %url, bytes = image.len(), "Storing image in memory cache");
        if let Some((evicted, _)) = cache.push(url, image) {
            trace!(url = %evicted, "Displaced cached image");
        }
    }

    async fn set_if(
        &self,
        url: String,
        image: Arc<PhotoImage>,
        keep: &(dyn Fn() -> bool + Sync),
    ) -> bool {
        let mut cache = self.cache.write().await;
        if !keep() {
            trace!(url = %url, "Skipped storing image");
            return false;
        }
        debug!(url = %url, bytes = image.len(), "Storing image in memory cache");
        if let Some((evicted, _)) = cache.push(url, image) {
            trace!(url = %evicted, "Displaced cached image");
        }
        true
    }

    async fn evict(&self, url: &str) {
        let mut cache = self.cache.write().await;
        if cache.pop(url).is_some() {
            debug!(url = %url, "Evicted image from memory cache");
        }
    }

    fn len(&self) -> usize {
        // Best-effort while a writer holds the lock.
        let cache = self.cache.try_read();
        cache.map(|c| c.len()).unwrap_or(0)
    }

    async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn image(url: &str) -> Arc<PhotoImage> {
        Arc::new(PhotoImage::new(url, Bytes::from_static(b"img"), 10, 10))
    }

    fn url(i: usize) -> String {
        format!("https://picsum.photos/id/{i}/300/200")
    }

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache = MemoryImageCache::new(10);
        cache.set(url(1), image(&url(1))).await;

        let retrieved = cache.get(&url(1)).await;

        assert_eq!(retrieved.unwrap().url, url(1));
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = MemoryImageCache::new(10);

        assert!(cache.get("https://nowhere").await.is_none());
    }

    #[tokio::test]
    async fn test_default_capacity() {
        let cache = MemoryImageCache::default();

        assert_eq!(cache.capacity().await, 100);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let cache = MemoryImageCache::new(0);
        cache.set(url(1), image(&url(1))).await;

        assert_eq!(cache.capacity().await, 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_overflow_evicts_least_recently_used() {
        let cache = MemoryImageCache::new(100);
        for i in 0..100 {
            cache.set(url(i), image(&url(i))).await;
        }

        // Touch the oldest entry so the second-oldest becomes LRU.
        assert!(cache.get(&url(0)).await.is_some());
        cache.set(url(100), image(&url(100))).await;

        assert_eq!(cache.len(), 100);
        assert!(cache.peek(&url(1)).await.is_none());
        assert!(cache.peek(&url(0)).await.is_some());
        for i in 2..=100 {
            assert!(cache.peek(&url(i)).await.is_some(), "missing {i}");
        }
    }

    #[tokio::test]
    async fn test_101_inserts_evict_first() {
        let cache = MemoryImageCache::new(100);
        for i in 0..101 {
            cache.set(url(i), image(&url(i))).await;
        }

        assert_eq!(cache.len(), 100);
        assert!(cache.get(&url(0)).await.is_none());
        assert!(cache.get(&url(100)).await.is_some());
    }

    #[tokio::test]
    async fn test_set_existing_key_replaces_without_eviction() {
        let cache = MemoryImageCache::new(2);
        cache.set(url(1), image(&url(1))).await;
        cache.set(url(2), image(&url(2))).await;
        cache.set(url(1), image("replaced")).await;

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&url(1)).await.unwrap().url, "replaced");
        assert!(cache.peek(&url(2)).await.is_some());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        cache.set(url(1), image(&url(1))).await;

        let _ = cache.get(&url(1)).await;
        let _ = cache.get(&url(2)).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_peek_does_not_promote() {
        let cache = MemoryImageCache::new(2);
        cache.set(url(1), image(&url(1))).await;
        cache.set(url(2), image(&url(2))).await;

        let _ = cache.peek(&url(1)).await;
        cache.set(url(3), image(&url(3))).await;

        assert!(cache.peek(&url(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_set_if_checks_condition() {
        let cache = MemoryImageCache::new(10);

        assert!(!cache.set_if(url(1), image(&url(1)), &|| false).await);
        assert!(cache.set_if(url(2), image(&url(2)), &|| true).await);

        assert!(cache.peek(&url(1)).await.is_none());
        assert!(cache.peek(&url(2)).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_and_clear() {
        let cache = MemoryImageCache::new(10);
        cache.set(url(1), image(&url(1))).await;
        cache.set(url(2), image(&url(2))).await;

        cache.evict(&url(1)).await;
        assert!(cache.peek(&url(1)).await.is_none());
        assert_eq!(cache.len(), 1);

        cache.clear().await;
        assert!(cache.is_empty());
    }
}
