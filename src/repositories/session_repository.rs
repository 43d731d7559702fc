// src/repositories/session_repository.rs

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

use crate::db::{format_timestamp, with_connection, ConnectionPool};
use crate::domain::{Session, UserId};
use crate::error::AppResult;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: Session) -> AppResult<Session>;
    async fn find_user_id_by_token(&self, token: &str) -> AppResult<Option<UserId>>;
}

pub struct SqliteSessionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: Session) -> AppResult<Session> {
        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
                params![
                    session.token,
                    session.user_id.to_string(),
                    format_timestamp(&session.created_at),
                ],
            )?;
            Ok(session)
        })
        .await
    }

    async fn find_user_id_by_token(&self, token: &str) -> AppResult<Option<UserId>> {
        let token = token.to_string();
        with_connection(&self.pool, move |conn| {
            let user_id: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM sessions WHERE token = ?1",
                    params![token],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(user_id.map(|id| id.parse::<UserId>()).transpose()?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::domain::{Role, User};
    use crate::repositories::{SqliteUserRepository, UserRepository};

    #[tokio::test]
    async fn test_issue_and_resolve_token() {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let users = SqliteUserRepository::new(Arc::clone(&pool));
        let sessions = SqliteSessionRepository::new(pool);

        let user = users
            .create(User::new(
                "reader".to_string(),
                "reader@example.com".to_string(),
                "salt$hash".to_string(),
                Role::User,
            ))
            .await
            .unwrap();

        let session = sessions.create(Session::issue(user.id)).await.unwrap();

        let resolved = sessions.find_user_id_by_token(&session.token).await.unwrap();
        assert_eq!(resolved, Some(user.id));
        assert_eq!(sessions.find_user_id_by_token("nope").await.unwrap(), None);
    }
}
