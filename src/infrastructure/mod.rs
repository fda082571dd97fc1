//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// reqwest-backed HTTP transport.
pub mod http;
/// Image caching and loading.
pub mod image;
/// Picsum photo list provider.
pub mod picsum;
/// Favourite record stores.
pub mod storage;

pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use http::HttpTransport;
pub use image::{CacheStats, ImageLoader, MemoryImageCache};
pub use picsum::PicsumPhotoProvider;
pub use storage::{FileRecordStore, MemoryRecordStore};
