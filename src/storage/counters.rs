//! Id issuance backed by the `counters` document.

use super::COLLECTION_COUNTERS;
use super::backend::{StorageBackend, StorageError};
use super::records::{decode, encode};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The three independent id sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdSpace {
    Group,
    Member,
    User,
}

impl fmt::Display for IdSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdSpace::Group => "group",
            IdSpace::Member => "member",
            IdSpace::User => "user",
        };
        f.write_str(name)
    }
}

/// Persisted shape of the `counters` document.
///
/// Each field is the next id to hand out in its space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub next_group: u64,
    pub next_member: u64,
    pub next_user: u64,
}

impl Counters {
    fn slot_mut(&mut self, space: IdSpace) -> &mut u64 {
        match space {
            IdSpace::Group => &mut self.next_group,
            IdSpace::Member => &mut self.next_member,
            IdSpace::User => &mut self.next_user,
        }
    }
}

/// Sole writer of the `counters` document.
pub struct CounterStore {
    backend: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl CounterStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Issues the next id in `space`.
    ///
    /// Returns the stored value and persists it incremented by one before returning.
    /// A missing or malformed counters document is an error; there is no default.
    pub async fn next_id(&self, space: IdSpace) -> Result<u64, StorageError> {
        let _guard = self.lock.lock().await;

        let mut counters = self.current().await?;
        let slot = counters.slot_mut(space);
        let id = *slot;
        *slot = id
            .checked_add(1)
            .ok_or_else(|| StorageError::Exhausted(space.to_string()))?;

        let document = encode(COLLECTION_COUNTERS, &counters)?;
        self.backend.save(COLLECTION_COUNTERS, document).await?;

        tracing::debug!("Issued {} id {}", space, id);
        Ok(id)
    }

    /// Reads the counters without issuing anything.
    pub async fn current(&self) -> Result<Counters, StorageError> {
        let raw = self.backend.load(COLLECTION_COUNTERS).await?;
        decode(COLLECTION_COUNTERS, &raw)
    }
}
