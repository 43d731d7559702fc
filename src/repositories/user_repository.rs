// src/repositories/user_repository.rs

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{format_timestamp, is_unique_violation, parse_timestamp, with_connection, ConnectionPool};
use crate::domain::{Role, User, UserId};
use crate::error::{AppError, AppResult};

const USER_COLUMNS: &str = "id, username, email, password_hash, bio, role, created_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username or email is taken
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Persist profile fields (username, email, bio)
    async fn update(&self, user: User) -> AppResult<User>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let id = row
            .get::<_, String>("id")?
            .parse::<UserId>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let role = row
            .get::<_, String>("role")?
            .parse::<Role>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;

        Ok(User {
            id,
            username: row.get("username")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            bio: row.get("bio")?,
            role,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
        })
    }
}

/// Name the field a users uniqueness failure refers to
fn conflict_from(err: &rusqlite::Error) -> AppError {
    let message = err.to_string();
    if message.contains("users.email") {
        AppError::Conflict("Email is already registered".to_string())
    } else {
        AppError::Conflict("Username is already taken".to_string())
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        with_connection(&self.pool, move |conn| {
            let result = conn.execute(
                &format!(
                    "INSERT INTO users ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    USER_COLUMNS
                ),
                params![
                    user.id.to_string(),
                    user.username,
                    user.email,
                    user.password_hash,
                    user.bio,
                    user.role.to_string(),
                    format_timestamp(&user.created_at),
                ],
            );

            match result {
                Ok(_) => Ok(user),
                Err(e) if is_unique_violation(&e) => Err(conflict_from(&e)),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        with_connection(&self.pool, move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                    params![id.to_string()],
                    Self::row_to_user,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        with_connection(&self.pool, move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                    params![email],
                    Self::row_to_user,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        with_connection(&self.pool, move |conn| {
            let result = conn.execute(
                "UPDATE users SET username = ?2, email = ?3, bio = ?4 WHERE id = ?1",
                params![user.id.to_string(), user.username, user.email, user.bio],
            );

            match result {
                Ok(0) => Err(AppError::NotFound),
                Ok(_) => Ok(user),
                Err(e) if is_unique_violation(&e) => Err(conflict_from(&e)),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }
}
