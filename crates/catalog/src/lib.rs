//! Catalog access for the product-selection funnel
//!
//! - [`client::CatalogClient`] fetches blueprints, print providers and variants
//!   with retry-with-backoff and a shared, time-bounded blueprint cache
//! - [`matcher`] ranks catalog items against free-text user input
//! - [`summarizer`] renders long item lists into bounded prompt text

pub mod cache;
pub mod client;
pub mod matcher;
pub mod retry;
pub mod summarizer;
pub mod transport;

pub use cache::{CachedCatalog, CatalogCache};
pub use client::{CatalogClient, CatalogEndpoints};
pub use retry::RetryPolicy;
pub use transport::{CatalogTransport, HttpTransport};
