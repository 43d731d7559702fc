// src/domain/book_reference.rs
//
// Origin-tagged book references.
//
// A reference names a book before its canonical identity is known. The
// origin is always carried explicitly by the caller; it is never guessed
// from the shape of the identifier.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::ids::BookId;
use crate::error::{AppError, AppResult};

/// Where a reference claims the book lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookOrigin {
    Local,
    External,
}

impl BookOrigin {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookOrigin::Local => "local",
            BookOrigin::External => "external",
        }
    }
}

impl fmt::Display for BookOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookOrigin {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BookOrigin::Local),
            "external" => Ok(BookOrigin::External),
            other => Err(AppError::InvalidReference(format!(
                "unknown book kind '{}', expected 'local' or 'external'",
                other
            ))),
        }
    }
}

/// The form every external id is stored and looked up in
pub fn normalize_external_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidReference(
            "external id cannot be empty".to_string(),
        ));
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookReference {
    /// A book already in the local catalog
    Local(BookId),
    /// A provider volume id, possibly not yet materialized
    External(String),
}

impl BookReference {
    /// Parse a `{kind, id}` pair as supplied by the transport layer.
    pub fn parse(kind: &str, id: &str) -> AppResult<Self> {
        let origin: BookOrigin = kind.parse()?;
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::InvalidReference(
                "book id cannot be empty".to_string(),
            ));
        }

        match origin {
            BookOrigin::Local => id
                .parse::<BookId>()
                .map(BookReference::Local)
                .map_err(|_| {
                    AppError::InvalidReference(format!("'{}' is not a local book id", id))
                }),
            BookOrigin::External => Self::external(id),
        }
    }

    pub fn local(id: BookId) -> Self {
        BookReference::Local(id)
    }

    /// Trimmed provider id; blank ids are rejected
    pub fn external(id: &str) -> AppResult<Self> {
        normalize_external_id(id).map(|id| BookReference::External(id.to_string()))
    }

    pub const fn origin(&self) -> BookOrigin {
        match self {
            BookReference::Local(_) => BookOrigin::Local,
            BookReference::External(_) => BookOrigin::External,
        }
    }

    pub fn id_string(&self) -> String {
        match self {
            BookReference::Local(id) => id.to_string(),
            BookReference::External(id) => id.clone(),
        }
    }
}

impl fmt::Display for BookReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin(), self.id_string())
    }
}

impl Serialize for BookReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BookReference", 2)?;
        state.serialize_field("kind", self.origin().as_str())?;
        state.serialize_field("id", &self.id_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_reference() {
        let id = BookId::new();
        let reference = BookReference::parse("local", &id.to_string()).unwrap();
        assert_eq!(reference, BookReference::Local(id));
    }

    #[test]
    fn test_parse_external_reference_keeps_provider_id() {
        let reference = BookReference::parse("external", " zyTCAlFPjgYC ").unwrap();
        assert_eq!(reference, BookReference::External("zyTCAlFPjgYC".to_string()));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let reference = BookReference::parse("External", "abc").unwrap();
        assert_eq!(reference.origin(), BookOrigin::External);
    }

    #[test]
    fn test_unknown_kind_is_invalid() {
        let err = BookReference::parse("google", "abc").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let err = BookReference::parse("external", "  ").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn test_local_id_must_be_an_internal_identifier() {
        // 24-char hex ids were the legacy local shape; they are not guessed at
        let err = BookReference::parse("local", "507f1f77bcf86cd799439011").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn test_external_constructor_normalizes_like_parse() {
        assert_eq!(
            BookReference::external(" G1 ").unwrap(),
            BookReference::parse("external", "G1").unwrap()
        );
        let err = BookReference::external(" \t").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn test_serializes_as_kind_and_id() {
        let reference = BookReference::external("G1").unwrap();
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "external", "id": "G1"}));
    }
}
