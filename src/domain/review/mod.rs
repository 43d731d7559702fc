pub mod entity;
pub mod invariants;

pub use entity::{Review, ReviewDetails};
pub use invariants::validate_review_input;
