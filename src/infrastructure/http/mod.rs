//! HTTP transport adapter.

mod transport;

pub use transport::{DEFAULT_TIMEOUT_SECS, HttpTransport};
