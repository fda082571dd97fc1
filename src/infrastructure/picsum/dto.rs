use serde::Deserialize;

use crate::domain::entities::Photo;

/// Picsum list endpoint photo record.
#[derive(Debug, Deserialize)]
pub struct PhotoResponse {
    /// Photo identifier.
    pub id: String,
    /// Photographer name.
    pub author: String,
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
    /// Source page on Unsplash.
    pub url: String,
    /// Direct download URL.
    pub download_url: String,
}

impl From<PhotoResponse> for Photo {
    fn from(response: PhotoResponse) -> Self {
        Self::new(
            response.id,
            response.author,
            response.width,
            response.height,
            response.url,
            response.download_url,
        )
    }
}
