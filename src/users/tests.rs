//! Users Module Tests
//!
//! ## Test Scopes
//! - **Availability**: case-insensitive username lookup.
//! - **Registration**: id issuance, hashing, duplicate refusal, required fields.
//! - **Login**: hashed and legacy plaintext credentials, response shape.

#[cfg(test)]
mod tests {
    use crate::error::ApiError;
    use crate::storage::{COLLECTION_COUNTERS, COLLECTION_USERS, CounterStore, MemoryBackend, RecordStore};
    use crate::users::types::{LoginForm, RegistrationForm, User};
    use crate::users::UserService;
    use std::sync::Arc;

    const COUNTERS: &str = r#"{"nextGroup":1,"nextMember":1,"nextUser":500}"#;
    const LEGACY_USERS: &str =
        r#"[{"id":7,"name":"Old Timer","username":"OldTimer","password":"plain-pass"}]"#;

    fn service_with(users_document: &str) -> (Arc<MemoryBackend>, UserService) {
        let backend = Arc::new(
            MemoryBackend::new()
                .with_document(COLLECTION_COUNTERS, COUNTERS)
                .with_document(COLLECTION_USERS, users_document),
        );
        let service = UserService::new(
            RecordStore::new(backend.clone(), COLLECTION_USERS),
            Arc::new(CounterStore::new(backend.clone())),
        );
        (backend, service)
    }

    fn registration(name: &str, username: &str, password: &str) -> RegistrationForm {
        RegistrationForm {
            name: Some(name.to_string()),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn login(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn stored_users(backend: &MemoryBackend) -> Vec<User> {
        serde_json::from_str(&backend.document(COLLECTION_USERS).unwrap()).unwrap()
    }

    // ============================================================
    // AVAILABILITY
    // ============================================================

    #[tokio::test]
    async fn test_username_availability_ignores_case() {
        let (_backend, service) = service_with(LEGACY_USERS);

        assert!(!service.username_available("oldtimer").await.unwrap());
        assert!(!service.username_available("OLDTIMER").await.unwrap());
        assert!(service.username_available("newcomer").await.unwrap());
    }

    // ============================================================
    // REGISTRATION
    // ============================================================

    #[tokio::test]
    async fn test_register_issues_id_and_hashes_password() {
        let (backend, service) = service_with("[]");

        let profile = service
            .register(registration("Ann Lee", "ann", "s3cret"))
            .await
            .unwrap();
        assert_eq!(profile.id, 500);
        assert_eq!(profile.name, "Ann Lee");
        assert_eq!(profile.username, "ann");

        let stored = stored_users(&backend);
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].password, "s3cret");
        assert!(stored[0].password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_differing_in_case() {
        let (backend, service) = service_with(LEGACY_USERS);

        let result = service
            .register(registration("Imposter", "OLDTIMER", "x"))
            .await;

        assert!(matches!(result, Err(ApiError::Forbidden)));
        assert_eq!(stored_users(&backend).len(), 1);
        let counters: serde_json::Value =
            serde_json::from_str(&backend.document(COLLECTION_COUNTERS).unwrap()).unwrap();
        assert_eq!(counters["nextUser"], 500);
    }

    #[tokio::test]
    async fn test_register_requires_username_and_password() {
        let (_backend, service) = service_with("[]");

        let result = service.register(registration("Ann", " ", "pw")).await;
        assert!(matches!(result, Err(ApiError::Validation { code: 1, .. })));

        let mut form = registration("Ann", "ann", "pw");
        form.password = None;
        let result = service.register(form).await;
        assert!(matches!(result, Err(ApiError::Validation { code: 2, .. })));
    }

    #[tokio::test]
    async fn test_register_without_name() {
        let (_backend, service) = service_with("[]");

        let mut form = registration("", "quiet", "pw");
        form.name = None;
        let profile = service.register(form).await.unwrap();
        assert_eq!(profile.name, "");
    }

    // ============================================================
    // LOGIN
    // ============================================================

    #[tokio::test]
    async fn test_login_after_register() {
        let (_backend, service) = service_with("[]");
        service
            .register(registration("Ann Lee", "Ann", "s3cret"))
            .await
            .unwrap();

        let profile = service.login(login("ANN", "s3cret")).await.unwrap();
        assert_eq!(profile.username, "Ann");
        assert_eq!(profile.id, 500);

        let body = serde_json::to_value(&profile).unwrap();
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_forbidden() {
        let (_backend, service) = service_with("[]");
        service
            .register(registration("Ann Lee", "ann", "s3cret"))
            .await
            .unwrap();

        let result = service.login(login("ann", "S3CRET")).await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[tokio::test]
    async fn test_login_legacy_plaintext_record() {
        let (_backend, service) = service_with(LEGACY_USERS);

        let profile = service.login(login("oldtimer", "plain-pass")).await.unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.name, "Old Timer");

        let result = service.login(login("oldtimer", "Plain-Pass")).await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_or_missing_fields() {
        let (_backend, service) = service_with(LEGACY_USERS);

        let result = service.login(login("ghost", "plain-pass")).await;
        assert!(matches!(result, Err(ApiError::Forbidden)));

        let result = service.login(LoginForm::default()).await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }
}
