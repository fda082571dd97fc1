//! Domain types for image handling.

use bytes::Bytes;

/// An image that was downloaded and decoded successfully.
///
/// Keeps the encoded bytes for rendering along with the decoded dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoImage {
    /// URL the image was loaded from; also its cache key.
    pub url: String,
    /// Encoded image bytes as served by the network.
    pub bytes: Bytes,
    /// Decoded width in pixels.
    pub width: u32,
    /// Decoded height in pixels.
    pub height: u32,
}

impl PhotoImage {
    /// Creates a new image.
    #[must_use]
    pub fn new(url: impl Into<String>, bytes: Bytes, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            bytes,
            width,
            height,
        }
    }

    /// Returns the encoded size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the encoded payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory cache.
    MemoryCache,
    /// Downloaded from the network.
    Network,
}

/// Status of an image in the loading pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Image loading has not started.
    #[default]
    NotStarted,
    /// Image is being downloaded or decoded.
    Loading,
    /// Image is loaded and ready for display.
    Ready(ImageSource),
    /// Image loading failed; the view shows a placeholder.
    Failed(String),
}

impl ImageStatus {
    /// Returns true if the image is ready for rendering.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns true if the image is currently being loaded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
