//! Persistent record store port definition.

use async_trait::async_trait;

use crate::domain::entities::{FavouriteRecord, PhotoId};
use crate::domain::errors::StorageError;

/// Predicate selecting favourite records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Records for one photo.
    PhotoId(PhotoId),
}

impl RecordFilter {
    /// Returns true if the record matches.
    #[must_use]
    pub fn matches(&self, record: &FavouriteRecord) -> bool {
        match self {
            Self::PhotoId(id) => record.photo_id == *id,
        }
    }
}

/// Port for the durable key-value record store backing favourites.
///
/// The store itself has no uniqueness constraint.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    /// Inserts a record and persists it before returning.
    async fn insert(&self, record: FavouriteRecord) -> Result<(), StorageError>;

    /// Deletes every record matching the filter, returning how many were removed.
    async fn delete(&self, filter: &RecordFilter) -> Result<usize, StorageError>;

    /// Fetches records matching the filter, or all records.
    async fn fetch(
        &self,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<FavouriteRecord>, StorageError>;

    /// Counts records matching the filter, or all records.
    async fn count(&self, filter: Option<&RecordFilter>) -> Result<usize, StorageError> {
        Ok(self.fetch(filter).await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Record store whose every operation fails.
    #[derive(Debug, Default)]
    pub struct FailingRecordStore;

    #[async_trait]
    impl RecordStorePort for FailingRecordStore {
        async fn insert(&self, _record: FavouriteRecord) -> Result<(), StorageError> {
            Err(StorageError::unavailable("mock failure"))
        }

        async fn delete(&self, _filter: &RecordFilter) -> Result<usize, StorageError> {
            Err(StorageError::unavailable("mock failure"))
        }

        async fn fetch(
            &self,
            _filter: Option<&RecordFilter>,
        ) -> Result<Vec<FavouriteRecord>, StorageError> {
            Err(StorageError::unavailable("mock failure"))
        }
    }
}
