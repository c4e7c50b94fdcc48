// HTTP side of the storefront: the product record and the catalog client
pub mod catalog;
pub mod params;
pub mod product;

// Re-export common types
pub use catalog::{ApiError, CatalogClient, Result, DEFAULT_BASE_URL};
pub use params::SearchParams;
pub use product::{Product, RawPrice};
