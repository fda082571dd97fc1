//! Photo entity and its derived image URLs.

use serde::{Deserialize, Serialize};

/// Base URL used to build resized image URLs.
pub const PICSUM_IMAGE_BASE: &str = "https://picsum.photos/id";

/// Target width for grid thumbnails.
pub const THUMBNAIL_WIDTH: u32 = 300;

/// Target width for the full-size detail image.
pub const FULL_WIDTH: u32 = 1500;

/// Stable photo identifier as assigned by the photo API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    /// Creates a new `PhotoId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PhotoId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A photo listed by the remote API.
///
/// Immutable once decoded. Two photos are equal when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Photo {
    id: PhotoId,
    author: String,
    width: u32,
    height: u32,
    source_url: String,
    download_url: String,
}

impl Photo {
    /// Creates a new photo.
    #[must_use]
    pub fn new(
        id: impl Into<PhotoId>,
        author: impl Into<String>,
        width: u32,
        height: u32,
        source_url: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            width,
            height,
            source_url: source_url.into(),
            download_url: download_url.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &PhotoId {
        &self.id
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Original width in pixels, `0` when unknown.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Original height in pixels, `0` when unknown.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Page of the photo on the source site.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// URL of the grid thumbnail.
    #[must_use]
    pub fn small_image_url(&self) -> String {
        self.scaled_image_url(THUMBNAIL_WIDTH)
    }

    /// URL of the full-size detail image.
    #[must_use]
    pub fn big_image_url(&self) -> String {
        self.scaled_image_url(FULL_WIDTH)
    }

    /// Builds a resized image URL keeping the original aspect ratio.
    ///
    /// Falls back to the download URL when the width is unknown.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scaled_image_url(&self, target_width: u32) -> String {
        if self.width == 0 {
            return self.download_url.clone();
        }

        let scale = f64::from(target_width) / f64::from(self.width);
        let target_height = (f64::from(self.height) * scale) as u64;

        format!(
            "{PICSUM_IMAGE_BASE}/{}/{target_width}/{target_height}",
            self.id
        )
    }
}
