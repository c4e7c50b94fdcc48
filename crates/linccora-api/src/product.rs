use serde::{Deserialize, Serialize};

/// A catalog item as the search backend returns it
///
/// Every field is optional on the wire. The backend fills missing
/// spreadsheet cells with `""`, so display code should go through the
/// accessor helpers rather than matching on `Some` directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// Identity key. Two products with the same URL are the same item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RawPrice>,
}

/// Price exactly as the backend sent it
///
/// Mostly free text like `"Tk. 1,250"`, but some sheets export plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

impl Product {
    /// Identity comparison - only the URL matters
    pub fn same_item(&self, other: &Product) -> bool {
        self.product_url == other.product_url
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.product_url)
    }

    pub fn brand(&self) -> Option<&str> {
        non_empty(&self.brand)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.product_name)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.product_image)
    }

    pub fn brand_label(&self) -> &str {
        self.brand().unwrap_or("Unknown Brand")
    }

    pub fn name_label(&self) -> &str {
        self.name().unwrap_or("Unnamed Product")
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
