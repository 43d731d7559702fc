use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ids::UserId;

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Stored lowercased
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub bio: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: UserId::new(),
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            bio: String::new(),
            role,
            created_at: crate::domain::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Profile changes; `None` leaves the field untouched
    pub fn update_profile(
        &mut self,
        username: Option<String>,
        email: Option<String>,
        bio: Option<String>,
    ) {
        if let Some(username) = username {
            self.username = username.trim().to_string();
        }
        if let Some(email) = email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(bio) = bio {
            self.bio = bio.trim().to_string();
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// Opaque bearer token bound to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(user_id: UserId) -> Self {
        Self {
            token: uuid::Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: crate::domain::now(),
        }
    }
}
