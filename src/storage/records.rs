use super::backend::{StorageBackend, StorageError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Records addressable by a numeric id.
///
/// Path parameters arrive as text; they match a record when they equal the
/// canonical decimal form of its id (`"7"` matches 7, `"07"` and `" 7"` do not).
pub trait Identified {
    fn id(&self) -> u64;

    fn id_matches(&self, raw: &str) -> bool {
        self.id().to_string() == raw
    }
}

pub fn find_by_id<'a, T: Identified>(records: &'a [T], raw: &str) -> Option<&'a T> {
    records.iter().find(|record| record.id_matches(raw))
}

pub fn find_by_id_mut<'a, T: Identified>(records: &'a mut [T], raw: &str) -> Option<&'a mut T> {
    records.iter_mut().find(|record| record.id_matches(raw))
}

/// Removes the first record whose id matches. Returns whether anything was removed.
pub fn remove_by_id<T: Identified>(records: &mut Vec<T>, raw: &str) -> bool {
    match records.iter().position(|record| record.id_matches(raw)) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

/// Typed view over one collection.
///
/// `load_all` always re-reads the backend; there is no cache. Mutations are not
/// persisted until `save_all` is called with the whole sequence.
pub struct RecordStore<T> {
    collection: &'static str,
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection,
            backend: self.backend.clone(),
            write_lock: self.write_lock.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn StorageBackend>, collection: &'static str) -> Self {
        Self {
            collection,
            backend,
            write_lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Acquires the collection's write lock.
    ///
    /// Hold the guard from `load_all` until `save_all` for every read-modify-write cycle.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn load_all(&self) -> Result<Vec<T>, StorageError> {
        let raw = self.backend.load(self.collection).await?;
        decode(self.collection, &raw)
    }

    pub async fn save_all(&self, records: &[T]) -> Result<(), StorageError> {
        let document = encode(self.collection, records)?;
        self.backend.save(self.collection, document).await
    }
}

pub(crate) fn decode<T: DeserializeOwned>(collection: &str, raw: &str) -> Result<T, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Malformed {
        collection: collection.to_string(),
        source,
    })
}

pub(crate) fn encode<T: Serialize + ?Sized>(
    collection: &str,
    value: &T,
) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Malformed {
        collection: collection.to_string(),
        source,
    })
}
