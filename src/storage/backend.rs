use async_trait::async_trait;
use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("collection `{0}` does not exist")]
    MissingCollection(String),

    #[error("I/O failure on collection `{collection}`: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document in collection `{collection}`: {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no ids left in the {0} id space")]
    Exhausted(String),
}

/// Raw access to named JSON documents.
///
/// A backend never interprets the documents it stores. `load` fails with
/// `StorageError::MissingCollection` when nothing was ever saved under the name.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    async fn load(&self, collection: &str) -> Result<String, StorageError>;

    async fn save(&self, collection: &str, document: String) -> Result<(), StorageError>;
}

/// Stores each collection as `<root>/<collection>.json`.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    fn staging_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!(".{collection}.json.tmp"))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load(&self, collection: &str) -> Result<String, StorageError> {
        let path = self.document_path(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::MissingCollection(collection.to_string()))
            }
            Err(source) => Err(StorageError::Io {
                collection: collection.to_string(),
                source,
            }),
        }
    }

    async fn save(&self, collection: &str, document: String) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            collection: collection.to_string(),
            source,
        };

        // Write next to the target and rename over it, so readers never see a torn file.
        let staging = self.staging_path(collection);
        tokio::fs::write(&staging, document.as_bytes())
            .await
            .map_err(io_err)?;
        tokio::fs::rename(&staging, self.document_path(collection))
            .await
            .map_err(io_err)?;

        tracing::debug!(
            "Saved collection {} ({} bytes) under {}",
            collection,
            document.len(),
            self.root.display()
        );
        Ok(())
    }
}

/// Keeps documents in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    documents: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collection, builder style.
    pub fn with_document(self, collection: &str, document: impl Into<String>) -> Self {
        self.documents.insert(collection.to_string(), document.into());
        self
    }

    /// Current raw text of a collection, if any.
    pub fn document(&self, collection: &str) -> Option<String> {
        self.documents
            .get(collection)
            .map(|entry| entry.value().clone())
    }

    pub fn remove(&self, collection: &str) {
        self.documents.remove(collection);
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self, collection: &str) -> Result<String, StorageError> {
        self.document(collection)
            .ok_or_else(|| StorageError::MissingCollection(collection.to_string()))
    }

    async fn save(&self, collection: &str, document: String) -> Result<(), StorageError> {
        self.documents.insert(collection.to_string(), document);
        Ok(())
    }
}
