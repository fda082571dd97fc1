//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{FavouriteRecord, Photo, PhotoId, PhotoImage};
pub use errors::{NetworkError, StorageError};
pub use ports::{ImageCachePort, ImageFetchPort, PhotoProviderPort, RecordStorePort, TransportPort};
