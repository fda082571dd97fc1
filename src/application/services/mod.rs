//! Application services shared by every screen.

mod favourite_events;
mod favourites_store;
mod photo_catalog;

pub use favourite_events::{FavouriteChanges, FavouriteEventBus, FavouriteHandler, Subscription};
pub use favourites_store::FavouritesStore;
pub use photo_catalog::{CatalogSnapshot, LoadState, PhotoCatalogService};
