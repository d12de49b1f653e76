//! Document Store Service
//!
//! Save, load and delete opaque JSON documents under namespaced keys.
//! Every save rewrites the whole value and restarts its expiry; there is no
//! read-modify-write, so per-key atomicity of the engine is sufficient.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::backend::KvBackend;
use crate::error::{KeeperError, Result};
use crate::store::{DocumentKey, DOCUMENT_TTL};

/// A document read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub data: Value,
    /// Time of the read, not of the write
    pub loaded_at: DateTime<Utc>,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// Nothing live was stored under the key
    Absent,
}

// == Document Store ==
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn KvBackend>,
    ttl: Duration,
}

impl DocumentStore {
    /// Creates a store whose documents live for the standard 30 days.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            ttl: DOCUMENT_TTL,
        }
    }

    /// Overrides the document lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Save ==
    /// Serializes `document` and stores it under `key`, replacing any
    /// previous value and restarting its expiry.
    ///
    /// Validation and serialization happen before the engine is touched, so
    /// a rejected save leaves the prior value and its expiry intact.
    pub async fn save<T>(&self, key: &str, document: &T) -> Result<DateTime<Utc>>
    where
        T: Serialize + ?Sized,
    {
        let key = DocumentKey::for_write(key)?;

        let bytes = serde_json::to_vec(document)
            .map_err(|e| KeeperError::Serialization(e.to_string()))?;

        let size = bytes.len();
        self.backend
            .set(&key.storage_key(), bytes, self.ttl)
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "Failed to save document");
                KeeperError::from(e)
            })?;

        info!(key = %key, bytes = size, "Document saved");
        Ok(Utc::now())
    }

    // == Load ==
    /// Reads and decodes the document under `key`.
    pub async fn load(&self, key: &str) -> Result<Loaded> {
        let key = DocumentKey::for_lookup(key)?;

        let bytes = self
            .backend
            .get(&key.storage_key())
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "Failed to load document");
                KeeperError::from(e)
            })?
            .ok_or_else(|| KeeperError::NotFound("save key not found".to_string()))?;

        let data: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(key = %key, error = %e, "Stored document failed to decode");
            KeeperError::CorruptData
        })?;

        debug!(key = %key, "Document loaded");
        Ok(Loaded {
            data,
            loaded_at: Utc::now(),
        })
    }

    // == Delete ==
    /// Removes the document under `key`, reporting whether one existed.
    pub async fn delete(&self, key: &str) -> Result<Deletion> {
        let key = DocumentKey::for_lookup(key)?;

        let removed = self
            .backend
            .delete(&key.storage_key())
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "Failed to delete document");
                KeeperError::from(e)
            })?;

        if removed {
            info!(key = %key, "Document deleted");
            Ok(Deletion::Deleted)
        } else {
            debug!(key = %key, "Delete of absent document");
            Ok(Deletion::Absent)
        }
    }
}
