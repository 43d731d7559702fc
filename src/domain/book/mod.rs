pub mod entity;
pub mod external;
pub mod invariants;

pub use entity::{Book, NewBook};
pub use external::ExternalBookRecord;
pub use invariants::validate_book;
