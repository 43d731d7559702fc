use super::entity::Book;
use crate::domain::{DomainError, DomainResult};

/// Validates all Book invariants
/// These are the absolute rules that must hold for a Book to be stored
pub fn validate_book(book: &Book) -> DomainResult<()> {
    validate_required("title", &book.title)?;
    validate_required("author", &book.author)?;
    validate_external_id(book.external_id.as_deref())?;
    Ok(())
}

fn validate_required(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Book {} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// An external id, when present, must carry a value
fn validate_external_id(external_id: Option<&str>) -> DomainResult<()> {
    if let Some(id) = external_id {
        if id.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Book external id cannot be blank".to_string(),
            ));
        }
    }
    Ok(())
}

/// Invariants that must hold true for the Book domain:
///
/// 1. Identity is immutable and assigned by the catalog store
/// 2. Title and author are never empty
/// 3. At most one Book exists per external id (storage-enforced)
/// 4. A Book without an external id is purely local
/// 5. Imported books are never refreshed from the provider
/// 6. Created timestamp never changes
