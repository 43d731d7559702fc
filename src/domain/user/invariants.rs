use regex::Regex;
use std::sync::OnceLock;

use super::entity::User;
use crate::domain::{DomainError, DomainResult};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const BIO_MAX: usize = 500;
const PASSWORD_MIN: usize = 6;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid username regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
    })
}

/// Validates all User invariants
pub fn validate_user(user: &User) -> DomainResult<()> {
    validate_username(&user.username)?;
    validate_email(&user.email)?;
    validate_bio(&user.bio)?;
    Ok(())
}

pub fn validate_username(username: &str) -> DomainResult<()> {
    let username = username.trim();
    let length = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return Err(DomainError::InvariantViolation(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        )));
    }
    if !username_pattern().is_match(username) {
        return Err(DomainError::InvariantViolation(
            "Username can only contain letters, numbers, underscores and hyphens".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if !email_pattern().is_match(email.trim()) {
        return Err(DomainError::InvariantViolation(
            "Invalid email address".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> DomainResult<()> {
    if bio.chars().count() > BIO_MAX {
        return Err(DomainError::InvariantViolation(format!(
            "Bio cannot exceed {} characters",
            BIO_MAX
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(DomainError::InvariantViolation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN
        )));
    }
    Ok(())
}
