// src/domain/user/password.rs
//
// bcrypt password hashes. Both calls are CPU-bound; async callers run
// them on the blocking pool.

use crate::error::AppResult;

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Fails only when `stored` is not a bcrypt hash
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    Ok(bcrypt::verify(password, stored)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_verifies_original_password() {
        let stored = hash_password("correct horse", TEST_COST).unwrap();
        assert!(verify_password("correct horse", &stored).unwrap());
        assert!(!verify_password("battery staple", &stored).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        assert_ne!(
            hash_password("secret1", TEST_COST).unwrap(),
            hash_password("secret1", TEST_COST).unwrap()
        );
    }

    #[test]
    fn test_hash_never_contains_the_password() {
        let stored = hash_password("secret1", TEST_COST).unwrap();
        assert!(stored.starts_with("$2"));
        assert!(!stored.contains("secret1"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let err = verify_password("secret1", "salt$deadbeef").unwrap_err();
        assert!(matches!(err, AppError::PasswordHash(_)));
    }
}
