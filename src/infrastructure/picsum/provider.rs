//! Photo list provider backed by the Picsum API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::dto::PhotoResponse;
use crate::domain::entities::Photo;
use crate::domain::errors::NetworkError;
use crate::domain::ports::{HttpRequest, PhotoProviderPort, TransportPort};

/// Default Picsum API base URL.
pub const PICSUM_API_BASE: &str = "https://picsum.photos/v2";

/// Number of photos requested in the single bulk fetch.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

const LIST_PATH: &str = "/list";

/// Stateless adapter mapping the Picsum list endpoint to domain photos.
pub struct PicsumPhotoProvider {
    transport: Arc<dyn TransportPort>,
    base_url: String,
    limit: u32,
}

impl PicsumPhotoProvider {
    /// Creates provider with default base URL and limit.
    #[must_use]
    pub fn new(transport: Arc<dyn TransportPort>) -> Self {
        Self::with_base_url(transport, PICSUM_API_BASE)
    }

    /// Creates provider with custom base URL.
    #[must_use]
    pub fn with_base_url(transport: Arc<dyn TransportPort>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Sets the number of photos requested.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    fn list_request(&self) -> HttpRequest {
        HttpRequest::get(&self.base_url, LIST_PATH).with_query("limit", self.limit.to_string())
    }
}

#[async_trait]
impl PhotoProviderPort for PicsumPhotoProvider {
    async fn fetch_photo_grid(&self) -> Result<Vec<Photo>, NetworkError> {
        let request = self.list_request();
        debug!(url = %request.endpoint(), limit = self.limit, "Fetching photo list");

        let body = self.transport.send(&request).await?;

        let records: Vec<PhotoResponse> = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse photo list");
            NetworkError::decode(e.to_string())
        })?;

        debug!(count = records.len(), "Photo list decoded");

        Ok(records.into_iter().map(Photo::from).collect())
    }
}

impl std::fmt::Debug for PicsumPhotoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PicsumPhotoProvider")
            .field("base_url", &self.base_url)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{HttpMethod, MockTransportPort};
    use bytes::Bytes;

    const GALLERY_JSON: &str = r#"[
        {"id": "1", "author": "Test Author 1", "width": 1000, "height": 800,
         "url": "https://example.com/photo1", "download_url": "https://example.com/download1"},
        {"id": "2", "author": "Test Author 2", "width": 1200, "height": 900,
         "url": "https://example.com/photo2", "download_url": "https://example.com/download2"},
        {"id": "3", "author": "Test Author 3", "width": 0, "height": 0,
         "url": "https://example.com/photo3", "download_url": "https://example.com/download3"}
    ]"#;

    fn provider_returning(
        body: Result<&'static str, NetworkError>,
        times: usize,
    ) -> PicsumPhotoProvider {
        let mut transport = MockTransportPort::new();
        transport
            .expect_send()
            .times(times)
            .returning(move |_| body.clone().map(|s| Bytes::from_static(s.as_bytes())));
        PicsumPhotoProvider::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn test_fetch_maps_wire_records() {
        let provider = provider_returning(Ok(GALLERY_JSON), 1);

        let photos = provider.fetch_photo_grid().await.unwrap();

        assert_eq!(photos.len(), 3);
        let first = &photos[0];
        assert_eq!(first.id().as_str(), "1");
        assert_eq!(first.author(), "Test Author 1");
        assert_eq!(first.width(), 1000);
        assert_eq!(first.height(), 800);
        assert_eq!(first.source_url(), "https://example.com/photo1");
        assert_eq!(first.download_url(), "https://example.com/download1");
        assert_eq!(photos[1].width(), 1200);
        assert_eq!(photos[1].height(), 900);
    }

    #[tokio::test]
    async fn test_empty_list() {
        let provider = provider_returning(Ok("[]"), 1);

        assert!(provider.fetch_photo_grid().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates_verbatim() {
        let provider = provider_returning(Err(NetworkError::bad_status(500)), 1);

        let err = provider.fetch_photo_grid().await.unwrap_err();
        assert_eq!(err, NetworkError::bad_status(500));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_failure() {
        let provider = provider_returning(Ok(r#"{"not": "a list"}"#), 1);

        let err = provider.fetch_photo_grid().await.unwrap_err();
        assert!(matches!(err, NetworkError::DecodeFailure { .. }));
    }

    #[tokio::test]
    async fn test_missing_field_is_decode_failure() {
        let provider = provider_returning(Ok(r#"[{"id": "1", "author": "A"}]"#), 1);

        let err = provider.fetch_photo_grid().await.unwrap_err();
        assert!(matches!(err, NetworkError::DecodeFailure { .. }));
    }

    #[tokio::test]
    async fn test_sends_list_request() {
        let mut transport = MockTransportPort::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.base == "https://picsum.photos/v2"
                    && request.path == "/list"
                    && request.query_param("limit") == Some("100")
            })
            .times(1)
            .returning(|_| Ok(Bytes::from_static(b"[]")));
        let provider = PicsumPhotoProvider::new(Arc::new(transport));

        provider.fetch_photo_grid().await.unwrap();
    }

    #[tokio::test]
    async fn test_custom_base_and_limit() {
        let mut transport = MockTransportPort::new();
        transport
            .expect_send()
            .withf(|request| {
                request.endpoint() == "http://localhost:8080/v2/list"
                    && request.query_param("limit") == Some("10")
            })
            .times(1)
            .returning(|_| Ok(Bytes::from_static(b"[]")));
        let provider =
            PicsumPhotoProvider::with_base_url(Arc::new(transport), "http://localhost:8080/v2/")
                .with_limit(10);

        provider.fetch_photo_grid().await.unwrap();
    }

    #[tokio::test]
    async fn test_every_call_hits_transport() {
        let provider = provider_returning(Ok("[]"), 3);

        for _ in 0..3 {
            provider.fetch_photo_grid().await.unwrap();
        }
    }
}
