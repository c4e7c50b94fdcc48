// Wishlist: an ordered set of products keyed by product_url, persisted on every change
use linccora_api::Product;
use linccora_cache::KeyValueStore;
use tracing::{debug, warn};

use crate::Result;

/// Storage key holding the JSON array of favorited products
pub const FAVORITES_KEY: &str = "linccora-favorites";

/// Add `product` if absent, remove it if present (by URL)
pub fn toggle(collection: &[Product], product: &Product) -> Vec<Product> {
    if collection.iter().any(|fav| fav.same_item(product)) {
        collection
            .iter()
            .filter(|fav| !fav.same_item(product))
            .cloned()
            .collect()
    } else {
        let mut updated = collection.to_vec();
        updated.push(product.clone());
        updated
    }
}

pub fn contains(collection: &[Product], product: &Product) -> bool {
    collection.iter().any(|fav| fav.same_item(product))
}

/// Read the wishlist back; anything missing or unreadable is an empty list
pub fn load(store: &dyn KeyValueStore) -> Vec<Product> {
    let raw = match store.get(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read favorites: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(items) => dedup_by_url(items),
        Err(e) => {
            warn!("Ignoring malformed favorites data: {}", e);
            Vec::new()
        }
    }
}

/// Overwrite the stored wishlist with `collection`
pub fn persist(store: &mut dyn KeyValueStore, collection: &[Product]) -> Result<()> {
    let encoded = serde_json::to_string(collection)?;
    store.set(FAVORITES_KEY, &encoded)?;
    debug!("Persisted {} favorites", collection.len());
    Ok(())
}

/// First occurrence wins
fn dedup_by_url(items: Vec<Product>) -> Vec<Product> {
    let mut unique: Vec<Product> = Vec::with_capacity(items.len());
    for item in items {
        if !contains(&unique, &item) {
            unique.push(item);
        }
    }
    unique
}

/// The wishlist plus the storage it lives in
pub struct FavoritesStore {
    store: Box<dyn KeyValueStore>,
    items: Vec<Product>,
}

impl FavoritesStore {
    /// Load whatever the last session left behind
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let items = load(store.as_ref());
        debug!("Loaded {} favorites", items.len());
        Self { store, items }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_favorite(&self, product: &Product) -> bool {
        contains(&self.items, product)
    }

    /// Toggle and persist. Returns whether the product is now favorited.
    ///
    /// The in-memory list is updated even if the write fails, so the
    /// screen matches what the user just did; the error is still returned.
    pub fn toggle(&mut self, product: &Product) -> Result<bool> {
        self.items = toggle(&self.items, product);
        let now_favorite = self.is_favorite(product);
        persist(self.store.as_mut(), &self.items)?;
        Ok(now_favorite)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        persist(self.store.as_mut(), &self.items)
    }
}
