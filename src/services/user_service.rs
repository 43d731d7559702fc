// src/services/user_service.rs
//
// User Service - accounts, sessions and profile access rules

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::domain::{
    hash_password, validate_bio, validate_email, validate_password, validate_user,
    validate_username, verify_password, Role, Session, User, UserId,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{SessionRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
}

/// A logged-in user and the bearer token that identifies them
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    auth: AuthConfig,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            auth,
        }
    }

    pub async fn register(&self, request: RegisterUser) -> AppResult<AuthSession> {
        validate_username(&request.username)?;
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let role = if self.auth.is_admin_username(&request.username) {
            Role::Admin
        } else {
            Role::User
        };

        let cost = self.auth.password_cost;
        let password = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        let mut user = User::new(request.username, request.email, password_hash, role);
        if let Some(bio) = request.bio {
            user.update_profile(None, None, Some(bio));
        }
        validate_user(&user)?;

        let user = self.user_repo.create(user).await?;
        log::info!("Registered user {} ({}) as {}", user.username, user.id, user.role);

        self.open_session(user).await
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let (password, stored) = (password.to_string(), user.password_hash.clone());
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await??;
        if !verified {
            log::debug!("Rejected login for user {}", user.id);
            return Err(AppError::Unauthenticated);
        }

        self.open_session(user).await
    }

    /// User owning a bearer token
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let user_id = self
            .session_repo
            .find_user_id_by_token(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    /// Owners and admins may read a profile
    pub async fn get_profile(&self, actor: &User, user_id: UserId) -> AppResult<User> {
        if actor.id != user_id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Only the owner may change a profile
    pub async fn update_profile(
        &self,
        actor: &User,
        user_id: UserId,
        changes: UpdateProfile,
    ) -> AppResult<User> {
        if actor.id != user_id {
            return Err(AppError::Forbidden);
        }

        if let Some(username) = &changes.username {
            validate_username(username)?;
        }
        if let Some(email) = &changes.email {
            validate_email(email)?;
        }
        if let Some(bio) = &changes.bio {
            validate_bio(bio.trim())?;
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        user.update_profile(changes.username, changes.email, changes.bio);

        self.user_repo.update(user).await
    }

    async fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let session = self.session_repo.create(Session::issue(user.id)).await?;
        Ok(AuthSession {
            token: session.token,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::repositories::{SqliteSessionRepository, SqliteUserRepository};

    fn service(admins: &[&str]) -> UserService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        UserService::new(
            Arc::new(SqliteUserRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteSessionRepository::new(pool)),
            AuthConfig {
                admin_usernames: admins.iter().map(|s| s.to_string()).collect(),
                password_cost: 4,
            },
        )
    }

    fn registration(username: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "hunter22".to_string(),
            bio: None,
        }
    }

    #[tokio::test]
    async fn test_register_login_authenticate() {
        let service = service(&[]);
        let registered = service.register(registration("reader")).await.unwrap();
        assert_eq!(registered.user.role, Role::User);

        let logged_in = service.login("READER@example.com", "hunter22").await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert_ne!(logged_in.token, registered.token);

        let user = service.authenticate(&logged_in.token).await.unwrap();
        assert_eq!(user.username, "reader");
    }

    #[tokio::test]
    async fn test_configured_admin_gets_admin_role() {
        let service = service(&["chief"]);
        let session = service.register(registration("chief")).await.unwrap();
        assert!(session.user.is_admin());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthenticated() {
        let service = service(&[]);
        service.register(registration("reader")).await.unwrap();

        let wrong_password = service.login("reader@example.com", "nope-nope").await.unwrap_err();
        let unknown_email = service.login("ghost@example.com", "hunter22").await.unwrap_err();
        assert!(matches!(wrong_password, AppError::Unauthenticated));
        assert!(matches!(unknown_email, AppError::Unauthenticated));

        let bad_token = service.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(bad_token, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_registration_validation() {
        let service = service(&[]);

        let mut short_password = registration("reader");
        short_password.password = "12345".to_string();
        assert!(matches!(
            service.register(short_password).await.unwrap_err(),
            AppError::Domain(_)
        ));

        assert!(matches!(
            service.register(registration("no spaces")).await.unwrap_err(),
            AppError::Domain(_)
        ));

        service.register(registration("reader")).await.unwrap();
        assert!(matches!(
            service.register(registration("reader")).await.unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_profile_access_rules() {
        let service = service(&["chief"]);
        let alice = service.register(registration("alice")).await.unwrap().user;
        let bob = service.register(registration("bob")).await.unwrap().user;
        let chief = service.register(registration("chief")).await.unwrap().user;

        assert_eq!(service.get_profile(&alice, alice.id).await.unwrap().id, alice.id);
        assert_eq!(service.get_profile(&chief, alice.id).await.unwrap().id, alice.id);
        assert!(matches!(
            service.get_profile(&bob, alice.id).await.unwrap_err(),
            AppError::Forbidden
        ));
        assert!(matches!(
            service.get_profile(&chief, UserId::new()).await.unwrap_err(),
            AppError::NotFound
        ));

        // Admins can read but not edit someone else's profile
        assert!(matches!(
            service
                .update_profile(&chief, alice.id, UpdateProfile::default())
                .await
                .unwrap_err(),
            AppError::Forbidden
        ));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = service(&[]);
        let alice = service.register(registration("alice")).await.unwrap().user;
        service.register(registration("bob")).await.unwrap();

        let updated = service
            .update_profile(
                &alice,
                alice.id,
                UpdateProfile {
                    bio: Some("  Likes long novels ".to_string()),
                    ..UpdateProfile::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bio, "Likes long novels");
        assert_eq!(updated.username, "alice");

        let err = service
            .update_profile(
                &alice,
                alice.id,
                UpdateProfile {
                    username: Some("bob".to_string()),
                    ..UpdateProfile::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service
            .update_profile(
                &alice,
                alice.id,
                UpdateProfile {
                    bio: Some("b".repeat(501)),
                    ..UpdateProfile::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }
}
