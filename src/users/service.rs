use super::password::{hash_password_blocking, verify_password_blocking};
use super::types::{LoginForm, RegistrationForm, User, UserProfile};
use crate::error::{ApiError, ApiResult};
use crate::groups::validation::required;
use crate::storage::{CounterStore, IdSpace, RecordStore};

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    MissingUsername = 1,
    MissingPassword = 2,
}

impl RegistrationRejection {
    pub fn reason(self) -> &'static str {
        match self {
            RegistrationRejection::MissingUsername => "username is missing or empty",
            RegistrationRejection::MissingPassword => "password is missing or empty",
        }
    }
}

impl From<RegistrationRejection> for ApiError {
    fn from(rejection: RegistrationRejection) -> Self {
        ApiError::Validation {
            code: rejection as u8,
            reason: rejection.reason(),
        }
    }
}

pub struct UserService {
    users: RecordStore<User>,
    counters: Arc<CounterStore>,
}

impl UserService {
    pub fn new(users: RecordStore<User>, counters: Arc<CounterStore>) -> Self {
        Self { users, counters }
    }

    /// True when no account holds `username`, ignoring case.
    pub async fn username_available(&self, username: &str) -> ApiResult<bool> {
        let users = self.users.load_all().await?;
        Ok(!users.iter().any(|u| u.has_username(username)))
    }

    /// Creates an account. A username already taken in any letter case is
    /// refused with `Forbidden`; callers are expected to check availability first.
    pub async fn register(&self, form: RegistrationForm) -> ApiResult<UserProfile> {
        let username = required(form.username).ok_or(RegistrationRejection::MissingUsername)?;
        let password = required(form.password).ok_or(RegistrationRejection::MissingPassword)?;

        let _guard = self.users.lock().await;
        let mut users = self.users.load_all().await?;

        if users.iter().any(|u| u.has_username(&username)) {
            tracing::warn!("Username {} already exists", username);
            return Err(ApiError::Forbidden);
        }

        let password = hash_password_blocking(password).await?;
        let id = self.counters.next_id(IdSpace::User).await?;
        let user = User {
            id,
            name: form.name.unwrap_or_default(),
            username,
            password,
        };
        let profile = user.profile();
        users.push(user);
        self.users.save_all(&users).await?;

        tracing::info!("New user added: {} ({})", profile.username, profile.id);
        Ok(profile)
    }

    /// Matches username ignoring case and password exactly.
    pub async fn login(&self, form: LoginForm) -> ApiResult<UserProfile> {
        let (Some(username), Some(password)) = (form.username, form.password) else {
            tracing::info!("Login attempt without credentials");
            return Err(ApiError::Forbidden);
        };

        let users = self.users.load_all().await?;
        for user in users.iter().filter(|u| u.has_username(&username)) {
            if verify_password_blocking(password.clone(), user.password.clone()).await? {
                tracing::info!("Login successful for: {}", user.username);
                return Ok(user.profile());
            }
        }

        tracing::info!("Credentials don't match known user");
        Err(ApiError::Forbidden)
    }
}
