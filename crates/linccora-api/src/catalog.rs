use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{params::SearchParams, product::Product};

/// Where the backend lives when nobody says otherwise
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Catalog request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid catalog response: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the product-search backend
///
/// The `try_*` methods report failures. `fetch_all` and `search` swallow
/// them, log, and hand back an empty list, which is what a product grid
/// wants when the backend is down.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("LINCCORA/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    /// Whole catalog, no parameters
    pub async fn try_fetch_all(&self) -> Result<Vec<Product>> {
        self.get_products(&[]).await
    }

    /// Filtered search - only non-empty params go on the wire
    pub async fn try_search(&self, params: &SearchParams) -> Result<Vec<Product>> {
        self.get_products(&params.to_query_pairs()).await
    }

    pub async fn fetch_all(&self) -> Vec<Product> {
        self.try_fetch_all().await.unwrap_or_else(|e| {
            warn!("Error fetching all products: {}", e);
            Vec::new()
        })
    }

    pub async fn search(&self, params: &SearchParams) -> Vec<Product> {
        self.try_search(params).await.unwrap_or_else(|e| {
            warn!("Error fetching products: {}", e);
            Vec::new()
        })
    }

    async fn get_products(&self, query: &[(&'static str, String)]) -> Result<Vec<Product>> {
        let url = self.search_url();
        debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!("Catalog returned {} products", products.len());
        Ok(products)
    }
}
