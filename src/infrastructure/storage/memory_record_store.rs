//! Volatile record store.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::entities::FavouriteRecord;
use crate::domain::errors::StorageError;
use crate::domain::ports::{RecordFilter, RecordStorePort};

/// Record store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<FavouriteRecord>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStorePort for MemoryRecordStore {
    async fn insert(&self, record: FavouriteRecord) -> Result<(), StorageError> {
        self.records.lock().push(record);
        Ok(())
    }

    async fn delete(&self, filter: &RecordFilter) -> Result<usize, StorageError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| !filter.matches(record));
        Ok(before - records.len())
    }

    async fn fetch(
        &self,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<FavouriteRecord>, StorageError> {
        let records = self.records.lock();
        Ok(records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(record)))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: Option<&RecordFilter>) -> Result<usize, StorageError> {
        let records = self.records.lock();
        Ok(records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(record)))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PhotoId;

    fn by_id(id: &str) -> RecordFilter {
        RecordFilter::PhotoId(PhotoId::new(id))
    }

    #[tokio::test]
    async fn test_store_has_no_uniqueness_constraint() {
        let store = MemoryRecordStore::new();
        store.insert(FavouriteRecord::new("1")).await.unwrap();
        store.insert(FavouriteRecord::new("1")).await.unwrap();

        assert_eq!(store.count(Some(&by_id("1"))).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_all_matches() {
        let store = MemoryRecordStore::new();
        for id in ["1", "2", "1"] {
            store.insert(FavouriteRecord::new(id)).await.unwrap();
        }

        assert_eq!(store.delete(&by_id("1")).await.unwrap(), 2);
        assert_eq!(store.delete(&by_id("1")).await.unwrap(), 0);
        assert_eq!(
            store.fetch(None).await.unwrap(),
            vec![FavouriteRecord::new("2")]
        );
    }
}
