//! HTTP transport port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::NetworkError;

/// HTTP method of a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// HTTP GET.
    #[default]
    Get,
}

/// A request sent through the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Base URL without trailing slash, e.g. `https://picsum.photos/v2`.
    pub base: String,
    /// Path appended to the base, e.g. `/list`.
    pub path: String,
    /// Query parameters in send order.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            base: base.into(),
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the endpoint URL without the query string.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base, self.path)
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Port for sending HTTP requests and receiving raw response bodies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: &HttpRequest) -> Result<Bytes, NetworkError>;
}
