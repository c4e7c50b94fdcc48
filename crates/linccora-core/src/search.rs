// Search orchestration: filter state in, published product list out
use std::sync::Arc;

use async_trait::async_trait;
use linccora_api::{CatalogClient, Product, SearchParams};
use tracing::{debug, info, warn};

use crate::{filters::FilterState, price::format_bound};

/// Anything that can answer a catalog search
///
/// `CatalogClient` is the real one; tests swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, params: &SearchParams) -> linccora_api::Result<Vec<Product>>;
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn search(&self, params: &SearchParams) -> linccora_api::Result<Vec<Product>> {
        self.try_search(params).await
    }
}

/// Backend request for the current filters
///
/// The backend only understands one `brand`. With two or more brands
/// selected we leave it off and filter locally instead of trusting the
/// backend to OR them.
pub fn build_params(filters: &FilterState) -> SearchParams {
    SearchParams {
        q: Some(filters.query.clone()).filter(|q| !q.is_empty()),
        brand: filters.primary_brand().map(str::to_string),
        category: filters.category.clone(),
        min_price: filters.min_price.map(format_bound),
        max_price: filters.max_price.map(format_bound),
    }
}

/// Keep only products whose brand is in `selected`; empty selection keeps all
pub fn apply_brand_filter(products: Vec<Product>, selected: &[String]) -> Vec<Product> {
    if selected.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| {
            p.brand
                .as_deref()
                .is_some_and(|brand| selected.iter().any(|s| s == brand))
        })
        .collect()
}

pub type SearchToken = u64;

/// A search that has been issued but not yet run
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub token: SearchToken,
    pub params: SearchParams,
    pub selected_brands: Vec<String>,
}

impl PendingSearch {
    /// Hit the source and post-filter. Never fails; failures ride in the outcome.
    pub async fn run(self, source: &dyn CatalogSource) -> SearchOutcome {
        let result = match source.search(&self.params).await {
            Ok(products) => Ok(apply_brand_filter(products, &self.selected_brands)),
            Err(e) => {
                warn!("Error searching products: {}", e);
                Err(e.to_string())
            }
        };

        SearchOutcome {
            token: self.token,
            result,
        }
    }
}

/// Finished search, tagged with the token it was issued under
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub token: SearchToken,
    pub result: Result<Vec<Product>, String>,
}

/// What `SearchResults::apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Latest search succeeded with this many products
    Published(usize),
    /// Latest search failed; products cleared and error recorded
    Failed,
    /// A newer search was issued since; outcome dropped
    Stale,
}

/// The product list currently on screen plus request bookkeeping
#[derive(Debug, Default)]
pub struct SearchResults {
    products: Vec<Product>,
    busy: bool,
    last_error: Option<String>,
    latest_token: SearchToken,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True while the most recently issued search is outstanding
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Why the last published search came back empty, if it failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn latest_token(&self) -> SearchToken {
        self.latest_token
    }

    /// Issue a new search for `filters`; anything older becomes stale
    pub fn dispatch(&mut self, filters: &FilterState) -> PendingSearch {
        self.latest_token += 1;
        self.busy = true;

        let params = build_params(filters);
        debug!("Dispatching search #{}: {:?}", self.latest_token, params);

        PendingSearch {
            token: self.latest_token,
            params,
            selected_brands: filters.selected_brands().to_vec(),
        }
    }

    /// Publish an outcome if it belongs to the latest search
    pub fn apply(&mut self, outcome: SearchOutcome) -> Applied {
        if outcome.token != self.latest_token {
            debug!(
                "Dropping stale search #{} (latest is #{})",
                outcome.token, self.latest_token
            );
            return Applied::Stale;
        }

        self.busy = false;
        match outcome.result {
            Ok(products) => {
                info!("Search #{} returned {} products", outcome.token, products.len());
                let count = products.len();
                self.products = products;
                self.last_error = None;
                Applied::Published(count)
            }
            Err(reason) => {
                self.products.clear();
                self.last_error = Some(reason);
                Applied::Failed
            }
        }
    }
}

/// Ties a catalog source to the published results
pub struct SearchOrchestrator {
    source: Arc<dyn CatalogSource>,
    results: SearchResults,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            results: SearchResults::new(),
        }
    }

    /// Shared handle for running pending searches on another task
    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn products(&self) -> &[Product] {
        self.results.products()
    }

    pub fn dispatch(&mut self, filters: &FilterState) -> PendingSearch {
        self.results.dispatch(filters)
    }

    pub fn apply(&mut self, outcome: SearchOutcome) -> Applied {
        self.results.apply(outcome)
    }

    /// Dispatch, run and apply in one go, for callers that don't overlap searches
    pub async fn refresh(&mut self, filters: &FilterState) -> Applied {
        let pending = self.dispatch(filters);
        let outcome = pending.run(self.source.as_ref()).await;
        self.apply(outcome)
    }
}
