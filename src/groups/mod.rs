//! Groups & Members Module
//!
//! Manages sponsored groups and the members enrolled in them.
//!
//! ## Rules
//! - **Ids**: groups and members get ids from the shared `CounterStore`; member ids are
//!   only looked up inside their parent group.
//! - **Capacity**: a group never holds more than `MaxGroupSize` members. Adding to a
//!   full group and shrinking below the current count are both conflicts (409).
//! - **Validation first**: payloads are checked before any id is issued or any
//!   collection is read, so rejected requests leave storage and counters untouched.
//! - **Idempotent deletes**: deleting an absent group or member still succeeds.
//!
//! ## Submodules
//! - **`types`**: persisted records (`Group`, `Member`) and form bodies.
//! - **`validation`**: ordered, short-circuiting payload checks with reason codes.
//! - **`service`**: the read-modify-write operations behind each endpoint.
//! - **`handlers`**: HTTP request handlers for the Axum web server.

pub mod handlers;
pub mod service;
pub mod types;
pub mod validation;

pub use service::GroupService;
pub use types::{Group, GroupForm, Member, MemberForm};
