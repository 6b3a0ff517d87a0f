//! User Accounts Module
//!
//! Registration, login and username availability.
//!
//! ## Rules
//! - Usernames are unique ignoring case; availability and registration use the same check.
//! - Passwords are stored as Argon2id hashes. Legacy plaintext records still log in.
//! - Responses carry `UserProfile` only; the credential is never serialized back.
//! - Duplicate usernames and failed logins answer 403 with no body.

pub mod handlers;
pub mod password;
pub mod service;
pub mod types;

pub use service::UserService;
pub use types::{User, UserProfile};

#[cfg(test)]
mod tests;
