//! Organizations Module
//!
//! Serves the read-only organization directory and the per-organization group
//! listing. Organizations are maintained outside this service; groups point at
//! them by name.

pub mod handlers;
pub mod service;
pub mod types;

pub use service::OrganizationDirectory;
pub use types::Organization;
