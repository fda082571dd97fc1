//! Picsum photo API adapter.

mod dto;
mod provider;

pub use provider::{DEFAULT_PAGE_LIMIT, PICSUM_API_BASE, PicsumPhotoProvider};
