// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - HTTP boundary between clients and services
// - Translates between DTOs and domain entities
// - Renders every failure through `ErrorResponse`

pub mod dto;
pub mod error_handling;
pub mod extractor;
pub mod routes;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use extractor::AuthenticatedUser;
pub use routes::create_router;
pub use state::AppState;
