use thiserror::Error;

/// Everything the storefront core can fail with
///
/// Most of these never reach the user: search failures degrade to an
/// empty product list and unreadable favorites degrade to an empty
/// wishlist. They surface when a caller asks for the strict path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog request failed: {0}")]
    ApiError(#[from] linccora_api::ApiError),

    #[error("Storage error: {0}")]
    StorageError(#[from] linccora_cache::StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
