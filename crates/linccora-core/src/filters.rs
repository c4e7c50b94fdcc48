/// What the shopper is currently asking for
///
/// Brands are multi-select. There is deliberately no stored "primary
/// brand": the single-brand backend parameter is derived from the
/// selection when a request is built, see [`FilterState::primary_brand`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    selected_brands: Vec<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Selected brands in the order they were picked
    pub fn selected_brands(&self) -> &[String] {
        &self.selected_brands
    }

    pub fn is_brand_selected(&self, brand: &str) -> bool {
        self.selected_brands.iter().any(|b| b == brand)
    }

    /// Flip a brand in or out of the selection. Returns true if now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        if let Some(pos) = self.selected_brands.iter().position(|b| b == brand) {
            self.selected_brands.remove(pos);
            false
        } else {
            self.selected_brands.push(brand.to_string());
            true
        }
    }

    /// Replace the selection wholesale, dropping duplicates
    pub fn select_brands<I, S>(&mut self, brands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_brands.clear();
        for brand in brands {
            let brand = brand.into();
            if !self.is_brand_selected(&brand) {
                self.selected_brands.push(brand);
            }
        }
    }

    /// The brand the backend can filter on by itself: only when exactly one is picked
    pub fn primary_brand(&self) -> Option<&str> {
        match self.selected_brands.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
    }

    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min_price = min;
        self.max_price = max;
    }

    /// "Clear All" in the sidebar: drops every filter but keeps the search text
    pub fn clear_filters(&mut self) {
        self.selected_brands.clear();
        self.category = None;
        self.min_price = None;
        self.max_price = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selected_brands.is_empty()
            || self.category.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Nothing typed, nothing filtered
    pub fn is_pristine(&self) -> bool {
        self.query.is_empty() && !self.has_active_filters()
    }
}

/// Parse a price bound typed by the user; blank or junk means "no bound"
pub fn parse_bound(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
