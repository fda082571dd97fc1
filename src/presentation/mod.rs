//! Presentation layer: per-screen view-models.

/// Screen view-models.
pub mod view_models;

pub use view_models::{
    ErrorViewModel, FavouritesViewModel, PhotoDetailViewModel, PhotoGridViewModel, ViewState,
};
