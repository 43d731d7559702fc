// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod book_identity_service;
pub mod catalog_service;
pub mod review_service;
pub mod user_service;


pub use book_identity_service::{BookIdentityService, CanonicalBook};

pub use catalog_service::{page_window, CatalogService, NewBookInput};

pub use review_service::{ReviewQuery, ReviewService};

pub use user_service::{AuthSession, RegisterUser, UpdateProfile, UserService};
