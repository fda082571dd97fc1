//! Application layer with the shared catalog and favourites services.

/// Service implementations.
pub mod services;

pub use services::{FavouritesStore, LoadState, PhotoCatalogService, Subscription};
