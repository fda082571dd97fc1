//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - Per-view image loading with cancellation

pub mod loader;
pub mod memory_cache;

pub use loader::ImageLoader;
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};
