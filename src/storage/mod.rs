//! Document Storage Module
//!
//! Persists every collection of the registry as a single JSON document.
//!
//! ## Core Concepts
//! - **Backend**: `StorageBackend` loads and saves the raw text of a named collection.
//!   `FileBackend` keeps one `<collection>.json` file per collection, `MemoryBackend`
//!   keeps documents in memory (tests, ephemeral deployments).
//! - **Record Store**: `RecordStore<T>` turns a collection into a typed `Vec<T>`.
//!   Loads and saves always cover the whole collection; there is no partial update.
//! - **Write Serialization**: each store carries a per-collection lock. Handlers hold it
//!   across their load -> mutate -> save cycle so concurrent writers cannot lose updates.
//! - **Counters**: `CounterStore` issues monotonically increasing ids for groups,
//!   members and users from the `counters` document.

pub mod backend;
pub mod counters;
pub mod records;

pub use backend::{FileBackend, MemoryBackend, StorageBackend, StorageError};
pub use counters::{CounterStore, Counters, IdSpace};
pub use records::{Identified, RecordStore};

/// Collection holding the `nextGroup` / `nextMember` / `nextUser` counters.
pub const COLLECTION_COUNTERS: &str = "counters";
/// Read-only organization directory.
pub const COLLECTION_ORGANIZATIONS: &str = "organizations";
/// Groups, each embedding its members.
pub const COLLECTION_GROUPS: &str = "groups";
/// Registered user accounts.
pub const COLLECTION_USERS: &str = "users";

#[cfg(test)]
mod tests;
