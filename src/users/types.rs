use serde::{Deserialize, Serialize};

/// A registered account as persisted.
///
/// `password` holds an Argon2id PHC string, or the raw password for accounts
/// created before hashing was introduced. It never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub username: String,
    pub password: String,
}

impl User {
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// Public view of a user: everything except the credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Availability {
    Yes,
    No,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: Availability,
}

/// Form body of `POST /api/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Form body of `POST /api/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}
