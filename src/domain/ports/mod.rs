mod image_cache_port;
mod photo_provider_port;
mod record_store_port;
mod transport_port;

pub use image_cache_port::{ImageCachePort, ImageFetchPort};
pub use photo_provider_port::PhotoProviderPort;
pub use record_store_port::{RecordFilter, RecordStorePort};
#[cfg(test)]
pub use transport_port::MockTransportPort;
pub use transport_port::{HttpMethod, HttpRequest, TransportPort};
