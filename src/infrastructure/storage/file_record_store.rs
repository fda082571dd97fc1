//! TOML file record store.
//!
//! Records are held in memory and the whole file is rewritten on every
//! mutation through a temporary file in the same directory, so a crash
//! leaves either the old or the new file on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::FavouriteRecord;
use crate::domain::errors::StorageError;
use crate::domain::ports::{RecordFilter, RecordStorePort};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    #[serde(default)]
    favourites: Vec<FavouriteRecord>,
}

/// Durable record store persisted as TOML.
pub struct FileRecordStore {
    path: PathBuf,
    records: Mutex<Vec<FavouriteRecord>>,
}

impl FileRecordStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let records = match tokio::fs::read_to_string(&path).await {
            Ok(content) => toml::from_str::<RecordFile>(&content)?.favourites,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No favourites file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), count = records.len(), "Loaded favourite records");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &[FavouriteRecord]) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(&RecordFile {
            favourites: records.to_vec(),
        })?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &content))
            .await
            .map_err(|e| StorageError::unavailable(format!("write task failed: {e}")))?
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl RecordStorePort for FileRecordStore {
    async fn insert(&self, record: FavouriteRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().await;
        records.push(record);
        if let Err(e) = self.persist(&records).await {
            records.pop();
            warn!(path = %self.path.display(), error = %e, "Failed to write favourites file");
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, filter: &RecordFilter) -> Result<usize, StorageError> {
        let mut records = self.records.lock().await;
        let kept: Vec<FavouriteRecord> = records
            .iter()
            .filter(|record| !filter.matches(record))
            .cloned()
            .collect();
        let removed = records.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        if let Err(e) = self.persist(&kept).await {
            warn!(path = %self.path.display(), error = %e, "Failed to write favourites file");
            return Err(e);
        }
        *records = kept;
        Ok(removed)
    }

    async fn fetch(
        &self,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<FavouriteRecord>, StorageError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(record)))
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for FileRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecordStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PhotoId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::open(dir.path().join("favourites.toml"))
            .await
            .unwrap();

        assert_eq!(store.count(None).await.unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("favourites.toml");

        let store = FileRecordStore::open(&path).await.unwrap();
        store.insert(FavouriteRecord::new("10")).await.unwrap();
        store.insert(FavouriteRecord::new("20")).await.unwrap();
        drop(store);

        let reopened = FileRecordStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.fetch(None).await.unwrap(),
            vec![FavouriteRecord::new("10"), FavouriteRecord::new("20")]
        );
    }

    #[tokio::test]
    async fn test_failed_insert_is_rolled_back() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("data");
        let store = FileRecordStore::open(parent.join("favourites.toml"))
            .await
            .unwrap();
        store.insert(FavouriteRecord::new("1")).await.unwrap();

        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "").unwrap();

        assert!(store.insert(FavouriteRecord::new("2")).await.is_err());
        assert_eq!(store.count(None).await.unwrap(), 1);
        assert_eq!(
            store.fetch(None).await.unwrap(),
            vec![FavouriteRecord::new("1")]
        );
    }

    #[tokio::test]
    async fn test_delete_is_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favourites.toml");
        let filter = RecordFilter::PhotoId(PhotoId::new("10"));

        let store = FileRecordStore::open(&path).await.unwrap();
        store.insert(FavouriteRecord::new("10")).await.unwrap();
        store.insert(FavouriteRecord::new("11")).await.unwrap();
        assert_eq!(store.delete(&filter).await.unwrap(), 1);
        drop(store);

        let reopened = FileRecordStore::open(&path).await.unwrap();
        assert_eq!(reopened.count(Some(&filter)).await.unwrap(), 0);
        assert_eq!(reopened.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reads_hand_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favourites.toml");
        std::fs::write(
            &path,
            "[[favourites]]\nphoto_id = \"7\"\n\n[[favourites]]\nphoto_id = \"9\"\n",
        )
        .unwrap();

        let store = FileRecordStore::open(&path).await.unwrap();
        let filter = RecordFilter::PhotoId(PhotoId::new("9"));

        assert_eq!(store.count(Some(&filter)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favourites.toml");
        std::fs::write(&path, "favourites = [").unwrap();

        let result = FileRecordStore::open(&path).await;

        assert!(matches!(result, Err(StorageError::Deserialize(_))));
    }
}
