//! `reqwest` implementation of the transport and image fetch ports.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::domain::errors::NetworkError;
use crate::domain::ports::{HttpMethod, HttpRequest, ImageFetchPort, TransportPort};

const USER_AGENT: &str = concat!("photogrid/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client shared by the photo provider and image loaders.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, NetworkError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a transport with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                NetworkError::invalid_request(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Bytes, NetworkError> {
        let response = builder.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            map_reqwest_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "HTTP request returned error status");
            return Err(NetworkError::bad_status(status.as_u16()));
        }

        response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read response body");
            map_reqwest_error(&e)
        })
    }
}

fn map_reqwest_error(e: &reqwest::Error) -> NetworkError {
    if e.is_timeout() {
        NetworkError::Timeout
    } else if e.is_connect() || e.is_request() || e.is_body() {
        NetworkError::ConnectionLost
    } else if e.is_decode() {
        NetworkError::decode(e.to_string())
    } else if e.is_builder() {
        NetworkError::invalid_request(e.to_string())
    } else if let Some(status) = e.status() {
        NetworkError::bad_status(status.as_u16())
    } else {
        NetworkError::ConnectionLost
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Bytes, NetworkError> {
        let url = request.endpoint();
        debug!(url = %url, query = ?request.query, "Sending request");

        let builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .query(&request.query);

        self.execute(builder, &url).await
    }
}

#[async_trait]
impl ImageFetchPort for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, NetworkError> {
        debug!(url = %url, "Downloading image");
        self.execute(self.client.get(url), url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(HttpTransport::new().is_ok());
        assert!(HttpTransport::with_timeout(5).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_request() {
        let transport = HttpTransport::new().unwrap();
        let request = HttpRequest::get("not a url", "/list");

        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidRequest { .. }));
    }
}
