//! Domain error types.

mod network_error;
mod storage_error;

pub use network_error::NetworkError;
pub use storage_error::StorageError;
