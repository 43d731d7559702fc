// src/services/book_identity_service.rs
//
// Book Identity Service
//
// Maps any book reference (local or external) to the single canonical
// local Book, creating it from provider data on first use.
//
// RULES:
// - `resolve` never writes
// - `materialize` is the only path that grows the catalog from external data
// - The UNIQUE index on books.external_id decides first-save races; losers
//   re-read the winner
// - No in-process locks or caches

use serde::Serialize;
use std::sync::Arc;

use crate::domain::{
    normalize_external_id, Book, BookId, BookReference, ExternalBookRecord, UserId,
};
use crate::error::{AppError, AppResult};
use crate::integrations::BookCatalogGateway;
use crate::repositories::BookRepository;

/// Outcome of resolving a reference.
/// Exactly one of `local` / `external` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalBook {
    pub local: Option<Book>,
    pub external: Option<ExternalBookRecord>,
    /// True only when this very call created the local row
    pub imported: bool,
}

impl CanonicalBook {
    fn stored(book: Book) -> Self {
        Self {
            local: Some(book),
            external: None,
            imported: false,
        }
    }
}

/// Where an import gets its provider data from
enum ImportSource<'a> {
    Fetch(&'a str),
    Record(ExternalBookRecord),
}

pub struct BookIdentityService {
    book_repo: Arc<dyn BookRepository>,
    gateway: Arc<dyn BookCatalogGateway>,
}

impl BookIdentityService {
    pub fn new(book_repo: Arc<dyn BookRepository>, gateway: Arc<dyn BookCatalogGateway>) -> Self {
        Self { book_repo, gateway }
    }

    // ========================================================================
    // PUBLIC API
    // ========================================================================

    /// Resolve a reference without side effects.
    ///
    /// Local ids must exist. External ids answer from the catalog when
    /// already materialized and from the provider otherwise.
    pub async fn resolve(&self, reference: &BookReference) -> AppResult<CanonicalBook> {
        match reference {
            BookReference::Local(id) => {
                let book = self
                    .book_repo
                    .find_by_id(*id)
                    .await?
                    .ok_or(AppError::BookNotFound)?;
                Ok(CanonicalBook::stored(book))
            }
            BookReference::External(external_id) => {
                let external_id = normalize_external_id(external_id)?;
                if let Some(book) = self.book_repo.find_by_external_id(external_id).await? {
                    log::debug!("External id {} already materialized as {}", external_id, book.id);
                    return Ok(CanonicalBook::stored(book));
                }

                let record = self.gateway.get_by_id(external_id).await?;
                Ok(CanonicalBook {
                    local: None,
                    external: Some(record),
                    imported: false,
                })
            }
        }
    }

    /// Return the local Book for an external id, importing it if needed.
    /// Safe to call concurrently for the same id.
    pub async fn materialize(&self, external_id: &str, added_by: Option<UserId>) -> AppResult<Book> {
        let (book, _) = self.import(ImportSource::Fetch(external_id), added_by).await?;
        Ok(book)
    }

    /// Same as `materialize` but reuses a record the caller already fetched
    pub async fn materialize_record(
        &self,
        record: ExternalBookRecord,
        added_by: Option<UserId>,
    ) -> AppResult<Book> {
        let (book, _) = self.import(ImportSource::Record(record), added_by).await?;
        Ok(book)
    }

    /// Materialize and report whether this call created the row
    pub async fn save_external(
        &self,
        external_id: &str,
        added_by: Option<UserId>,
    ) -> AppResult<CanonicalBook> {
        let (book, imported) = self.import(ImportSource::Fetch(external_id), added_by).await?;
        Ok(CanonicalBook {
            local: Some(book),
            external: None,
            imported,
        })
    }

    /// Internal id every review must reference
    pub async fn canonical_id(
        &self,
        reference: &BookReference,
        added_by: Option<UserId>,
    ) -> AppResult<BookId> {
        match reference {
            BookReference::Local(id) => {
                self.book_repo
                    .find_by_id(*id)
                    .await?
                    .map(|book| book.id)
                    .ok_or(AppError::BookNotFound)
            }
            BookReference::External(external_id) => {
                Ok(self.materialize(external_id, added_by).await?.id)
            }
        }
    }

    /// Local Book for an external id if one was already saved. Never calls the provider.
    pub async fn lookup_external(&self, external_id: &str) -> AppResult<Option<Book>> {
        let external_id = normalize_external_id(external_id)?;
        self.book_repo.find_by_external_id(external_id).await
    }

    // ========================================================================
    // INTERNAL: IMPORT
    // ========================================================================

    async fn import(
        &self,
        source: ImportSource<'_>,
        added_by: Option<UserId>,
    ) -> AppResult<(Book, bool)> {
        let external_id = match &source {
            ImportSource::Fetch(id) => normalize_external_id(id)?,
            ImportSource::Record(record) => normalize_external_id(&record.external_id)?,
        }
        .to_string();

        // Step 1: already in the catalog?
        if let Some(book) = self.book_repo.find_by_external_id(&external_id).await? {
            return Ok((book, false));
        }

        // Step 2: provider data
        let record = match source {
            ImportSource::Fetch(_) => self.gateway.get_by_id(&external_id).await?,
            ImportSource::Record(record) => record,
        };

        // Step 3: insert; the unique index arbitrates concurrent first saves
        let mut new_book = record.to_new_book(added_by);
        new_book.external_id = Some(external_id.clone());

        match self.book_repo.create(new_book).await {
            Ok(book) => {
                log::info!("Imported external book {} as {}", external_id, book.id);
                Ok((book, true))
            }
            Err(AppError::DuplicateExternalId(id)) => {
                log::warn!("Lost first-save race for {}; using existing row", id);
                match self.book_repo.find_by_external_id(&external_id).await? {
                    Some(book) => Ok((book, false)),
                    None => Err(AppError::DuplicateExternalId(id)),
                }
            }
            Err(e) => Err(e),
        }
    }
}
