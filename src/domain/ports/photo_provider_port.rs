//! Photo provider port definition.

use async_trait::async_trait;

use crate::domain::entities::Photo;
use crate::domain::errors::NetworkError;

/// Port for fetching the photo list from the remote API.
#[async_trait]
pub trait PhotoProviderPort: Send + Sync {
    /// Fetches the full photo list. Every call hits the network.
    async fn fetch_photo_grid(&self) -> Result<Vec<Photo>, NetworkError>;
}
