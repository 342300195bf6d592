//! Postgres User Repository
//!
//! Postgres implementation of the user repository. The `users` table
//! carries a unique constraint on `username`; duplicate inserts surface
//! as a database error the application layer maps to a duplicate.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use platform::password::HashedPassword;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{RegistrationError, RegistrationResult};

/// Postgres-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    display_name: String,
    password_hash: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> RegistrationResult<User> {
        let password_hash = HashedPassword::from_phc_string(&self.password_hash)
            .map_err(|e| RegistrationError::Internal(e.to_string()))?;

        Ok(User {
            id: self.id,
            username: self.username,
            display_name: self.display_name,
            password_hash,
            image: self.image,
            created_at: self.created_at,
        })
    }
}

impl UserRepository for PgUserRepository {
    async fn save(&self, user: NewUser) -> RegistrationResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, display_name, password_hash, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, display_name, password_hash, image, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(user.password_hash.as_phc_string())
        .bind(&user.image)
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_username(&self, username: &str) -> RegistrationResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, display_name, password_hash, image, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
