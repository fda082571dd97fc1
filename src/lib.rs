//! `PhotoGrid` - photo browsing core.
//!
//! A shared, fetch-once photo catalog over the Picsum API, a durable set of
//! favourite photos that broadcasts every change to the screens showing it,
//! and an LRU image cache with cancellable per-view loaders.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the shared services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing screen view-models.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
