pub mod client;
pub mod normalize;

pub use client::GoogleBooksClient;
pub use normalize::normalize;
