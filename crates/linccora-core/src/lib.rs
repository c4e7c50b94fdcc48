// Storefront logic that doesn't care how it gets drawn
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod price;
pub mod schedule;
pub mod search;

pub use config::Config;
pub use error::Error;
pub use favorites::FavoritesStore;
pub use filters::FilterState;
pub use linccora_api::{Product, RawPrice, SearchParams};
pub use schedule::{RepeatingTask, Rotation};
pub use search::{Applied, CatalogSource, SearchOrchestrator, SearchOutcome, SearchResults};

pub type Result<T> = std::result::Result<T, Error>;
