/// Query parameters for `GET /search`
///
/// Fields that are `None` or empty are left off the request entirely;
/// the backend treats a missing parameter as "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchParams {
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Non-empty parameters in wire order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("q", &self.q),
            ("brand", &self.brand),
            ("category", &self.category),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some((name, v.clone())),
            _ => None,
        })
        .collect()
    }

    /// True when the request would hit the unfiltered catalog
    pub fn is_unfiltered(&self) -> bool {
        self.to_query_pairs().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_non_empty_fields_are_sent() {
        let params = SearchParams {
            q: Some("panjabi".into()),
            brand: Some(String::new()),
            category: None,
            min_price: Some("500".into()),
            max_price: Some(String::new()),
        };

        assert_eq!(
            params.to_query_pairs(),
            vec![("q", "panjabi".to_string()), ("min_price", "500".to_string())]
        );
    }

    #[test]
    fn test_pair_order_is_stable() {
        let params = SearchParams {
            q: Some("a".into()),
            brand: Some("b".into()),
            category: Some("c".into()),
            min_price: Some("1".into()),
            max_price: Some("2".into()),
        };
        let names: Vec<_> = params.to_query_pairs().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["q", "brand", "category", "min_price", "max_price"]);
    }

    #[test]
    fn test_default_is_unfiltered() {
        assert!(SearchParams::default().is_unfiltered());
        assert!(!SearchParams::query("silk").is_unfiltered());
    }
}
