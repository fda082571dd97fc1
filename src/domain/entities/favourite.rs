//! Durable favourite record.

use serde::{Deserialize, Serialize};

use super::PhotoId;

/// A persisted "photo is favourited" fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavouriteRecord {
    /// The favourited photo.
    pub photo_id: PhotoId,
}

impl FavouriteRecord {
    /// Creates a record for the given photo.
    #[must_use]
    pub fn new(photo_id: impl Into<PhotoId>) -> Self {
        Self {
            photo_id: photo_id.into(),
        }
    }
}
