use async_trait::async_trait;
use quiz_core::model::{HistoryEntry, HistoryEntryId, NewHistoryEntry};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Append-only log of completed quiz sessions.
///
/// Ids come from an ascending sequence owned by the store. Clearing the log
/// removes entries but does not rewind that sequence.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Make sure the log exists. Safe to call repeatedly; never drops entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be prepared.
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Persist a new entry and return its assigned id once it is durable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError>;

    /// All surviving entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if entries cannot be read or decoded.
    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be cleared.
    async fn clear_all(&self) -> Result<(), StorageError>;
}

#[derive(Default)]
struct HistoryLog {
    entries: Vec<HistoryEntry>,
    last_id: i64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    history: Arc<Mutex<HistoryLog>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.last_id += 1;
        let id = HistoryEntryId::new(guard.last_id);
        guard.entries.push(HistoryEntry::assigned(id, *entry));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.entries.clone())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entries.clear();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
///
/// Built once at startup and shared; the backing connection is not reopened per call.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryRepository::new());
        Self { history }
    }
}
