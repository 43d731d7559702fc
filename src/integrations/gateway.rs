// src/integrations/gateway.rs
//
// Seam between the book services and whichever provider backs the
// external catalog. Services only ever see this trait.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ExternalBookRecord;
use crate::error::AppResult;

/// One page of provider search results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalSearchResult {
    pub items: Vec<ExternalBookRecord>,
    /// Provider-reported total, possibly approximate
    pub total: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogGateway: Send + Sync {
    async fn search(&self, query: &str, limit: u32, offset: u32) -> AppResult<ExternalSearchResult>;

    /// Fails with `ExternalBookNotFound` when the provider has no such volume
    async fn get_by_id(&self, external_id: &str) -> AppResult<ExternalBookRecord>;
}
