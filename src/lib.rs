//! Group Registry Library
//!
//! A small REST backend for organizations, sponsored groups with their members,
//! and user accounts. Each collection lives in one JSON document.
//!
//! ## Architecture Modules
//! - **`storage`**: pluggable document backends, the typed `RecordStore` and the
//!   `CounterStore` that issues ids.
//! - **`groups`**: group and member validation, operations and HTTP handlers.
//! - **`organizations`**: the read-only organization directory.
//! - **`users`**: registration, login and username availability.
//! - **`routes`**: endpoint paths and the Axum `Router`.
//! - **`config`**: bind address and data directory resolution.
//! - **`error`**: the API error taxonomy and its HTTP mapping.
//! - **`extract`**: form or JSON request bodies.

pub mod config;
pub mod error;
pub mod extract;
pub mod groups;
pub mod organizations;
pub mod routes;
pub mod storage;
pub mod users;
