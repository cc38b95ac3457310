// Copyright 2025 Cowboy AI, LLC.

//! Persistence boundary
//!
//! The core keeps its authoritative state in memory; durability is the job
//! of an external collaborator consuming [`LotStore`]. A snapshot captures
//! the full lot state (catalog plus ledger) with read-your-writes
//! consistency: it is taken under the same locks the operations use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::catalog::LotCatalog;
use crate::errors::{DomainError, DomainResult};
use crate::ledger::LedgerState;

/// Serializable capture of the whole lot state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotSnapshot {
    /// Floors and spots
    pub catalog: LotCatalog,
    /// Vehicles and tickets
    pub ledger: LedgerState,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

/// Durable storage for lot snapshots
#[async_trait]
pub trait LotStore: Send + Sync {
    /// Persist a snapshot, replacing any previous one
    async fn save(&self, snapshot: &LotSnapshot) -> DomainResult<()>;

    /// Load the most recent snapshot, if one exists
    async fn load(&self) -> DomainResult<Option<LotSnapshot>>;
}

/// In-memory [`LotStore`] holding the snapshot as serialized JSON.
///
/// Serializing through the same codec a durable store would use keeps the
/// round-trip honest; it is also what the tests exercise.
#[derive(Debug, Default)]
pub struct InMemoryLotStore {
    data: Mutex<Option<Vec<u8>>>,
}

impl InMemoryLotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LotStore for InMemoryLotStore {
    async fn save(&self, snapshot: &LotSnapshot) -> DomainResult<()> {
        let bytes = serde_json::to_vec(snapshot)
            .map_err(|e| DomainError::Internal(format!("snapshot serialization failed: {e}")))?;
        let mut slot = self
            .data
            .lock()
            .map_err(|_| DomainError::Internal("snapshot store lock poisoned".into()))?;
        *slot = Some(bytes);
        Ok(())
    }

    async fn load(&self) -> DomainResult<Option<LotSnapshot>> {
        let slot = self
            .data
            .lock()
            .map_err(|_| DomainError::Internal("snapshot store lock poisoned".into()))?;
        slot.as_deref()
            .map(serde_json::from_slice)
            .transpose()
            .map_err(|e| DomainError::Internal(format!("snapshot deserialization failed: {e}")))
    }
}
