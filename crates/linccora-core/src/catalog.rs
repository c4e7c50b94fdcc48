// Small derivations over a product list, used to build the filter sidebar and slideshow
use std::collections::BTreeSet;

use linccora_api::Product;

use crate::price::parse_price;

/// Distinct non-empty brands, sorted
pub fn unique_brands(products: &[Product]) -> Vec<String> {
    sorted_unique(products.iter().filter_map(Product::brand))
}

/// Distinct non-empty categories, sorted
pub fn unique_categories(products: &[Product]) -> Vec<String> {
    sorted_unique(products.iter().filter_map(Product::category))
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted union of two option lists, so narrowing results never drops a choice
pub fn merge_options(existing: &[String], found: &[String]) -> Vec<String> {
    sorted_unique(existing.iter().chain(found).map(String::as_str))
}

/// Distinct brands in order of first appearance, at most `limit`
pub fn featured_brands(products: &[Product], limit: usize) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();
    for brand in products.iter().filter_map(Product::brand) {
        if brands.len() == limit {
            break;
        }
        if !brands.iter().any(|b| b == brand) {
            brands.push(brand.to_string());
        }
    }
    brands
}

/// Client-side price bounds. A `None` bound doesn't constrain.
pub fn filter_by_price(products: &[Product], min: Option<f64>, max: Option<f64>) -> Vec<Product> {
    products
        .iter()
        .filter(|product| {
            let price = parse_price(product.price.as_ref());
            min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linccora_api::RawPrice;

    fn product(brand: &str, category: &str, price: &str) -> Product {
        Product {
            brand: Some(brand.to_string()),
            category: Some(category.to_string()),
            price: Some(RawPrice::Text(price.to_string())),
            product_url: Some(format!("https://shop.example.com/{}/{}", brand, price)),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Yellow", "Panjabi", "Tk 2,500"),
            product("Aarong", "Saree", "Tk 12,000"),
            product("", "", "Call for price"),
            product("Yellow", "Kurta", "Tk 1,200"),
            product("Kay Kraft", "Saree", "Tk 4,800"),
        ]
    }

    #[test]
    fn test_unique_brands_sorted_without_blanks() {
        assert_eq!(unique_brands(&sample()), ["Aarong", "Kay Kraft", "Yellow"]);
    }

    #[test]
    fn test_unique_categories() {
        assert_eq!(unique_categories(&sample()), ["Kurta", "Panjabi", "Saree"]);
    }

    #[test]
    fn test_featured_brands_keep_first_seen_order() {
        assert_eq!(featured_brands(&sample(), 12), ["Yellow", "Aarong", "Kay Kraft"]);
        assert_eq!(featured_brands(&sample(), 2), ["Yellow", "Aarong"]);
        assert!(featured_brands(&sample(), 0).is_empty());
    }

    #[test]
    fn test_merge_options_keeps_earlier_choices() {
        let seen = unique_brands(&sample());
        let narrowed = vec!["Aarong".to_string()];
        assert_eq!(merge_options(&seen, &narrowed), ["Aarong", "Kay Kraft", "Yellow"]);

        let fresh = vec!["Bibi".to_string()];
        assert_eq!(merge_options(&seen, &fresh), ["Aarong", "Bibi", "Kay Kraft", "Yellow"]);
    }

    #[test]
    fn test_filter_by_price_bounds() {
        let within = filter_by_price(&sample(), Some(2000.0), Some(5000.0));
        let brands: Vec<_> = within.iter().filter_map(|p| p.brand()).collect();
        assert_eq!(brands, ["Yellow", "Kay Kraft"]);
    }

    #[test]
    fn test_unpriced_items_count_as_zero() {
        // Only a max bound: "Call for price" parses as 0 and slips through
        let cheap = filter_by_price(&sample(), None, Some(1500.0));
        assert_eq!(cheap.len(), 2);

        let no_bounds = filter_by_price(&sample(), None, None);
        assert_eq!(no_bounds.len(), sample().len());
    }
}
