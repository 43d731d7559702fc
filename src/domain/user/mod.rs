pub mod entity;
pub mod invariants;
pub mod password;

pub use entity::{Role, Session, User};
pub use invariants::{validate_bio, validate_email, validate_password, validate_user, validate_username};
pub use password::{hash_password, verify_password};
