//! Persisted drawings.
//!
//! All records live in one JSON array under a single storage key. Every
//! write replaces the whole collection.

use crate::session::Session;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Default key of the drawing collection.
pub const DRAWINGS_KEY: &str = "drawings";

/// A saved drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingRecord {
    pub id: String,
    pub title: String,
    /// PNG data URI of the bitmap.
    pub image: String,
    /// ISO-8601 creation time.
    pub created_at: String,
    pub user_id: String,
}

impl DrawingRecord {
    /// A new record with a fresh identifier, stamped now.
    pub fn new(title: impl Into<String>, snapshot: &Snapshot, user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            image: snapshot.to_data_uri(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_id: user_id.into(),
        }
    }

    /// Decode the stored image.
    pub fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        Snapshot::from_data_uri(&self.image)
    }
}

/// Why a save wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nobody is signed in.
    NoUser,
    /// The drawing being edited is not in the collection.
    RecordNotFound,
}

/// Result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A record was appended with this identifier.
    Created(String),
    /// The record with this identifier was updated.
    Updated(String),
    /// Nothing was written.
    Skipped(SkipReason),
}

impl SaveOutcome {
    /// Identifier of the record that was written.
    pub fn drawing_id(&self) -> Option<&str> {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => Some(id),
            SaveOutcome::Skipped(_) => None,
        }
    }
}

/// What to save.
#[derive(Debug, Clone)]
pub struct SaveRequest<'a> {
    /// The record to update, or `None` to create one.
    pub drawing_id: Option<&'a str>,
    pub title: &'a str,
    pub image: &'a Snapshot,
}

/// Reads and writes the drawing collection in a key-value store.
pub struct DrawingStore<S: KeyValueStore + ?Sized> {
    storage: Arc<S>,
    key: String,
}

impl<S: KeyValueStore + ?Sized> Clone for DrawingStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
        }
    }
}

impl<S: KeyValueStore + ?Sized> DrawingStore<S> {
    /// Use the default `drawings` key.
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, DRAWINGS_KEY)
    }

    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Every stored record. A missing collection is empty.
    pub fn load_all(&self) -> StorageResult<Vec<DrawingRecord>> {
        match self.storage.get(&self.key)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored collection.
    pub fn store_all(&self, records: &[DrawingRecord]) -> StorageResult<()> {
        let json =
            serde_json::to_string(records).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &json)
    }

    pub fn find(&self, id: &str) -> StorageResult<Option<DrawingRecord>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id == id))
    }

    /// Records owned by a user, newest first.
    pub fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<DrawingRecord>> {
        let mut records: Vec<_> = self
            .load_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Remove a record. Returns whether it existed.
    pub fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store_all(&records)?;
        log::info!("Deleted drawing {}", id);
        Ok(true)
    }

    /// Create or update a record for the session's user.
    ///
    /// Updates replace only the title and image. Nothing is written without
    /// a user, or when the record to update no longer exists.
    pub fn save(&self, session: &Session, request: SaveRequest<'_>) -> StorageResult<SaveOutcome> {
        let Some(user_id) = session.user_id() else {
            log::warn!("Save skipped: no signed-in user");
            return Ok(SaveOutcome::Skipped(SkipReason::NoUser));
        };

        let mut records = self.load_all()?;

        let outcome = match request.drawing_id {
            Some(id) => {
                let Some(record) = records.iter_mut().find(|r| r.id == id) else {
                    log::warn!("Save skipped: drawing {} not found", id);
                    return Ok(SaveOutcome::Skipped(SkipReason::RecordNotFound));
                };
                record.title = request.title.to_string();
                record.image = request.image.to_data_uri();
                SaveOutcome::Updated(id.to_string())
            }
            None => {
                let record = DrawingRecord::new(request.title, request.image, user_id);
                let id = record.id.clone();
                records.push(record);
                SaveOutcome::Created(id)
            }
        };

        self.store_all(&records)?;
        log::info!("Saved drawing: {:?}", outcome);
        Ok(outcome)
    }
}
