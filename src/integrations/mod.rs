// src/integrations/mod.rs
//
// External Integrations Module

pub mod gateway;
pub mod google_books;

pub use gateway::{BookCatalogGateway, ExternalSearchResult};
pub use google_books::GoogleBooksClient;

#[cfg(test)]
pub use gateway::MockBookCatalogGateway;
