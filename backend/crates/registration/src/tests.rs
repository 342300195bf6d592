//! Unit tests for the registration crate
//!
//! Drives the full router through tower's `oneshot` with an in-memory
//! repository, covering signup validation, duplicate handling and
//! Basic-Auth login.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use platform::password::ClearTextPassword;

use crate::application::config::RegistrationConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{RegistrationError, RegistrationResult};

/// In-memory repository mirroring the Postgres unique constraint.
#[derive(Clone, Default)]
struct MemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserRepository {
    fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn stored_hash(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.password_hash.as_phc_string().to_string())
    }
}

impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: NewUser) -> RegistrationResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            // The real store raises a unique violation here; the use
            // case already rejects duplicates before save, so this is
            // only reachable through a race.
            return Err(RegistrationError::DuplicateUsername);
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: user.username,
            display_name: user.display_name,
            password_hash: user.password_hash,
            image: user.image,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> RegistrationResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// Database error double carrying a PostgreSQL SQLSTATE code.
#[derive(Debug)]
struct StubDatabaseError {
    code: &'static str,
}

impl fmt::Display for StubDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database error (SQLSTATE {})", self.code)
    }
}

impl StdError for StubDatabaseError {}

impl sqlx::error::DatabaseError for StubDatabaseError {
    fn message(&self) -> &str {
        "database error"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        match self.code {
            "23505" => sqlx::error::ErrorKind::UniqueViolation,
            _ => sqlx::error::ErrorKind::Other,
        }
    }
}

fn db_error(code: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(StubDatabaseError { code }))
}

/// Repository where every insert loses a signup race: the username
/// lookup sees nothing yet, then the unique constraint rejects the
/// insert with SQLSTATE 23505.
#[derive(Clone, Default)]
struct RacingUserRepository;

impl UserRepository for RacingUserRepository {
    async fn save(&self, _user: NewUser) -> RegistrationResult<User> {
        Err(RegistrationError::Database(db_error("23505")))
    }

    async fn find_by_username(&self, _username: &str) -> RegistrationResult<Option<User>> {
        Ok(None)
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;

    use axum::Router;
    use axum::body::Body;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::presentation::router::registration_router_generic;

    fn app<R>(repo: R) -> Router
    where
        R: UserRepository + Clone + Send + Sync + 'static,
    {
        registration_router_generic(repo, RegistrationConfig::default())
    }

    fn signup_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/1.0/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn login_request(credentials: Option<(&str, &str)>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/api/1.0/login");
        if let Some((username, password)) = credentials {
            let encoded = BASE64.encode(format!("{username}:{password}"));
            builder = builder.header(header::AUTHORIZATION, format!("Basic {encoded}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn valid_signup_body() -> Value {
        json!({
            "username": "test-user",
            "displayName": "test-display",
            "password": "P4ssword",
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_with_valid_user_returns_ok_and_persists() {
        let repo = MemoryUserRepository::default();
        let response = app(repo.clone())
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "User saved");
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_signup_stores_hashed_password() {
        let repo = MemoryUserRepository::default();
        app(repo.clone())
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();

        let hash = repo.stored_hash("test-user").unwrap();
        assert_ne!(hash, "P4ssword");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username_returns_validation_error() {
        let repo = MemoryUserRepository::default();
        let app = app(repo.clone());

        let first = app
            .clone()
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        let body = body_json(second).await;
        assert_eq!(body["validationErrors"]["username"], "This name is in use");
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_signup_missing_username_has_dedicated_message() {
        let body = json!({ "displayName": "test-display", "password": "P4ssword" });
        let response = app(MemoryUserRepository::default())
            .oneshot(signup_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["validationErrors"]["username"],
            "Username cannot be null"
        );
    }

    #[tokio::test]
    async fn test_signup_explicit_null_username_has_dedicated_message() {
        let body = json!({
            "username": null,
            "displayName": "test-display",
            "password": "P4ssword",
        });
        let response = app(MemoryUserRepository::default())
            .oneshot(signup_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["validationErrors"]["username"],
            "Username cannot be null"
        );
    }

    #[tokio::test]
    async fn test_signup_losing_insert_race_reports_duplicate_username() {
        let response = app(RacingUserRepository)
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["validationErrors"]["username"], "This name is in use");
    }

    #[tokio::test]
    async fn test_signup_weak_password_reports_pattern_message() {
        let body = json!({
            "username": "test-user",
            "displayName": "test-display",
            "password": "alllowercase",
        });
        let response = app(MemoryUserRepository::default())
            .oneshot(signup_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["validationErrors"]["password"],
            "Password must have at least one uppercase, one lowercase letter and one number"
        );
    }

    #[tokio::test]
    async fn test_signup_empty_body_aggregates_all_field_errors() {
        let response = app(MemoryUserRepository::default())
            .oneshot(signup_request(json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["path"], "/api/1.0/users");
        assert_eq!(body["message"], "Validation error");
        assert!(body["timestamp"].is_i64());
        assert_eq!(body["validationErrors"].as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_login_without_credentials_is_unauthorized() {
        let response = app(MemoryUserRepository::default())
            .oneshot(login_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));

        let body = body_json(response).await;
        assert_eq!(body["path"], "/api/1.0/login");
        assert!(body.get("validationErrors").is_none());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let repo = MemoryUserRepository::default();
        let app = app(repo);
        app.clone()
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();

        let response = app
            .oneshot(login_request(Some(("test-user", "WrongP4ss"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_is_unauthorized() {
        let response = app(MemoryUserRepository::default())
            .oneshot(login_request(Some(("nobody", "P4ssword"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_returns_profile() {
        let repo = MemoryUserRepository::default();
        let app = app(repo.clone());
        app.clone()
            .oneshot(signup_request(valid_signup_body()))
            .await
            .unwrap();

        let response = app
            .oneshot(login_request(Some(("test-user", "P4ssword"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["username"], "test-user");
        assert_eq!(body["displayName"], "test-display");
        assert!(body.as_object().unwrap().contains_key("image"));
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_login_with_malformed_basic_header_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/1.0/login")
            .header(header::AUTHORIZATION, "Basic not!base64")
            .body(Body::empty())
            .unwrap();

        let response = app(MemoryUserRepository::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::*;

    use crate::application::sign_up::{SignUpInput, SignUpUseCase};

    fn use_case(repo: MemoryUserRepository) -> SignUpUseCase<MemoryUserRepository> {
        SignUpUseCase::new(Arc::new(repo), Arc::new(RegistrationConfig::default()))
    }

    fn input(username: &str) -> SignUpInput {
        SignUpInput {
            username: username.to_string(),
            display_name: "test-display".to_string(),
            password: "P4ssword".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_sign_up_assigns_id_and_hashes() {
        let repo = MemoryUserRepository::default();
        let user = use_case(repo).execute(input("test-user")).await.unwrap();

        assert_eq!(user.id, 1);
        let clear = ClearTextPassword::new("P4ssword".to_string());
        assert!(user.password_hash.verify(&clear, None));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_existing_username() {
        let repo = MemoryUserRepository::default();
        let use_case = use_case(repo);
        use_case.execute(input("test-user")).await.unwrap();

        let err = use_case.execute(input("test-user")).await.unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_sign_up_uniqueness_is_case_sensitive() {
        let repo = MemoryUserRepository::default();
        let use_case = use_case(repo.clone());
        use_case.execute(input("test-user")).await.unwrap();
        use_case.execute(input("Test-User")).await.unwrap();

        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_unique_violation_predicate() {
        assert!(RegistrationError::is_unique_violation(&db_error("23505")));
        assert!(!RegistrationError::is_unique_violation(&db_error("23514")));
        assert!(!RegistrationError::is_unique_violation(
            &sqlx::Error::RowNotFound
        ));
    }

    #[tokio::test]
    async fn test_sign_up_maps_losing_race_to_duplicate() {
        let use_case = SignUpUseCase::new(
            Arc::new(RacingUserRepository),
            Arc::new(RegistrationConfig::default()),
        );

        let err = use_case.execute(input("test-user")).await.unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_pepper_changes_verification() {
        let repo = MemoryUserRepository::default();
        let peppered = SignUpUseCase::new(
            Arc::new(repo),
            Arc::new(RegistrationConfig::with_pepper(b"pepper".to_vec())),
        );
        let user = peppered.execute(input("test-user")).await.unwrap();

        let clear = ClearTextPassword::new("P4ssword".to_string());
        assert!(user.password_hash.verify(&clear, Some(b"pepper")));
        assert!(!user.password_hash.verify(&clear, None));
    }
}
