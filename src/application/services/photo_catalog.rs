//! Shared photo catalog with single-flight fetching.
//!
//! Every screen reads the photo list through one `PhotoCatalogService`. The
//! first `fetch_photos` call hits the provider, concurrent callers join that
//! same in-flight request, and later calls are served from the stored
//! snapshot until `refresh_photos` forces a new fetch.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::Photo;
use crate::domain::errors::NetworkError;
use crate::domain::ports::PhotoProviderPort;

/// Immutable photo list shared between consumers.
pub type CatalogSnapshot = Arc<[Photo]>;

type FetchResult = Result<CatalogSnapshot, NetworkError>;
type InFlight = Shared<BoxFuture<'static, FetchResult>>;

/// Load state of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No snapshot loaded, or the last fetch failed.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// A snapshot is loaded.
    Loaded,
}

enum Phase {
    Idle,
    Loading { generation: u64, flight: InFlight },
    Loaded,
}

struct CatalogState {
    phase: Phase,
    snapshot: Option<CatalogSnapshot>,
    generation: u64,
}

/// Single source of truth for the photo list.
pub struct PhotoCatalogService {
    provider: Arc<dyn PhotoProviderPort>,
    state: Mutex<CatalogState>,
}

impl PhotoCatalogService {
    /// Creates an idle catalog over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn PhotoProviderPort>) -> Self {
        Self {
            provider,
            state: Mutex::new(CatalogState {
                phase: Phase::Idle,
                snapshot: None,
                generation: 0,
            }),
        }
    }

    /// Returns the current load state.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        match self.state.lock().phase {
            Phase::Idle => LoadState::Idle,
            Phase::Loading { .. } => LoadState::Loading,
            Phase::Loaded => LoadState::Loaded,
        }
    }

    /// Returns the last complete snapshot without any I/O.
    #[must_use]
    pub fn snapshot(&self) -> Option<CatalogSnapshot> {
        self.state.lock().snapshot.clone()
    }

    /// Returns the photo list, fetching it at most once.
    ///
    /// Callers arriving while a fetch is outstanding wait for that fetch and
    /// receive its result.
    ///
    /// # Errors
    /// Returns the provider's error verbatim; the catalog returns to idle.
    pub async fn fetch_photos(&self) -> Result<CatalogSnapshot, NetworkError> {
        let (generation, flight) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if let Phase::Loading { generation, flight } = &state.phase {
                debug!(generation, "Joining in-flight photo fetch");
                (*generation, flight.clone())
            } else if let (Phase::Loaded, Some(snapshot)) = (&state.phase, &state.snapshot) {
                debug!(count = snapshot.len(), "Serving cached photo catalog");
                return Ok(Arc::clone(snapshot));
            } else {
                self.start_fetch(state)
            }
        };

        let result = flight.await;
        self.complete(generation, &result);
        result
    }

    /// Discards the load state and fetches a fresh list.
    ///
    /// Always issues exactly one new provider call. A fetch still in flight
    /// from before the refresh is superseded.
    ///
    /// # Errors
    /// Returns the provider's error verbatim; the catalog returns to idle.
    pub async fn refresh_photos(&self) -> Result<CatalogSnapshot, NetworkError> {
        let (generation, flight) = {
            let mut state = self.state.lock();
            state.phase = Phase::Idle;
            self.start_fetch(&mut state)
        };

        debug!(generation, "Refreshing photo catalog");
        let result = flight.await;
        self.complete(generation, &result);
        result
    }

    fn start_fetch(&self, state: &mut CatalogState) -> (u64, InFlight) {
        state.generation += 1;
        let generation = state.generation;

        let provider = Arc::clone(&self.provider);
        let flight = async move {
            provider
                .fetch_photo_grid()
                .await
                .map(CatalogSnapshot::from)
        }
        .boxed()
        .shared();

        state.phase = Phase::Loading {
            generation,
            flight: flight.clone(),
        };
        debug!(generation, "Started photo fetch");

        (generation, flight)
    }

    fn complete(&self, generation: u64, result: &FetchResult) {
        let mut state = self.state.lock();

        // Only the current flight may settle the state, and only once.
        let is_current = matches!(
            state.phase,
            Phase::Loading { generation: current, .. } if current == generation
        );
        if !is_current {
            return;
        }

        match result {
            Ok(photos) => {
                info!(count = photos.len(), generation, "Photo catalog loaded");
                state.snapshot = Some(Arc::clone(photos));
                state.phase = Phase::Loaded;
            }
            Err(e) => {
                warn!(error = %e, generation, "Photo catalog fetch failed");
                state.phase = Phase::Idle;
            }
        }
    }
}

impl std::fmt::Debug for PhotoCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoCatalogService")
            .field("state", &self.load_state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockPhotoProvider, sample_photo};
    use tokio::sync::Semaphore;

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.id().as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_when_idle_calls_provider() {
        let provider = Arc::new(MockPhotoProvider::new(vec![
            sample_photo("1"),
            sample_photo("2"),
        ]));
        let catalog = PhotoCatalogService::new(provider.clone());

        assert_eq!(catalog.load_state(), LoadState::Idle);
        let photos = catalog.fetch_photos().await.unwrap();

        assert_eq!(ids(&photos), vec!["1", "2"]);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(catalog.load_state(), LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_fetch_when_loaded_returns_snapshot() {
        let provider = Arc::new(MockPhotoProvider::new(vec![sample_photo("1")]));
        let catalog = PhotoCatalogService::new(provider.clone());
        let first = catalog.fetch_photos().await.unwrap();

        provider.set_photos(vec![sample_photo("2")]);
        let second = catalog.fetch_photos().await.unwrap();

        assert_eq!(ids(&second), vec!["1"]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_is_loaded() {
        let provider = Arc::new(MockPhotoProvider::new(Vec::new()));
        let catalog = PhotoCatalogService::new(provider.clone());

        assert!(catalog.fetch_photos().await.unwrap().is_empty());
        assert!(catalog.fetch_photos().await.unwrap().is_empty());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_error_propagates_and_resets_to_idle() {
        let provider = Arc::new(MockPhotoProvider::failing(NetworkError::bad_status(500)));
        let catalog = PhotoCatalogService::new(provider.clone());

        let err = catalog.fetch_photos().await.unwrap_err();
        assert_eq!(err, NetworkError::bad_status(500));
        assert_eq!(catalog.load_state(), LoadState::Idle);

        provider.set_photos(vec![sample_photo("1")]);
        let photos = catalog.fetch_photos().await.unwrap();
        assert_eq!(ids(&photos), vec!["1"]);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_forces_refetch() {
        let provider = Arc::new(MockPhotoProvider::new(vec![sample_photo("1")]));
        let catalog = PhotoCatalogService::new(provider.clone());
        catalog.fetch_photos().await.unwrap();

        provider.set_photos(vec![sample_photo("2"), sample_photo("3")]);
        let refreshed = catalog.refresh_photos().await.unwrap();
        assert_eq!(ids(&refreshed), vec!["2", "3"]);
        assert_eq!(provider.call_count(), 2);

        let cached = catalog.fetch_photos().await.unwrap();
        assert_eq!(ids(&cached), vec!["2", "3"]);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let provider = Arc::new(MockPhotoProvider::new(vec![sample_photo("1")]));
        let catalog = PhotoCatalogService::new(provider.clone());
        catalog.fetch_photos().await.unwrap();

        provider.set_error(NetworkError::Timeout);
        assert_eq!(
            catalog.refresh_photos().await.unwrap_err(),
            NetworkError::Timeout
        );

        assert_eq!(catalog.load_state(), LoadState::Idle);
        let snapshot = catalog.snapshot().unwrap();
        assert_eq!(ids(&snapshot), vec!["1"]);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Arc::new(
            MockPhotoProvider::new(vec![sample_photo("1")]).with_gate(Arc::clone(&gate)),
        );
        let catalog = Arc::new(PhotoCatalogService::new(provider.clone()));

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                tokio::spawn(async move { catalog.fetch_photos().await })
            })
            .collect();

        tokio::task::yield_now().await;
        gate.add_permits(1);

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap().unwrap());
        }

        assert_eq!(provider.call_count(), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_error() {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Arc::new(
            MockPhotoProvider::failing(NetworkError::ConnectionLost).with_gate(Arc::clone(&gate)),
        );
        let catalog = Arc::new(PhotoCatalogService::new(provider.clone()));

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                tokio::spawn(async move { catalog.fetch_photos().await })
            })
            .collect();

        tokio::task::yield_now().await;
        gate.add_permits(1);

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap_err(), NetworkError::ConnectionLost);
        }
        assert_eq!(provider.call_count(), 1);
        assert_eq!(catalog.load_state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_refresh_supersedes_in_flight_fetch() {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Arc::new(
            MockPhotoProvider::new(vec![sample_photo("old")]).with_gate(Arc::clone(&gate)),
        );
        let catalog = Arc::new(PhotoCatalogService::new(provider.clone()));

        let stale = {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.fetch_photos().await })
        };
        while provider.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        provider.set_photos(vec![sample_photo("new")]);
        gate.add_permits(2);
        let refreshed = catalog.refresh_photos().await.unwrap();
        stale.await.unwrap().unwrap();

        assert_eq!(ids(&refreshed), vec!["new"]);
        assert_eq!(ids(&catalog.snapshot().unwrap()), vec!["new"]);
        assert_eq!(provider.call_count(), 2);
    }
}
