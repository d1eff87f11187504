use super::Book;
use serde::{Deserialize, Serialize};

fn default_search_size() -> usize {
    10
}

/// Query of the backend's search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_search_size")]
    pub size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            category: None,
            author: None,
            page: 0,
            size: default_search_size(),
        }
    }
}

impl SearchParams {
    /// Query pairs with empty filters left out
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (name, value) in [
            ("keyword", &self.keyword),
            ("category", &self.category),
            ("author", &self.author),
        ] {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, v.to_string()));
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub books: Vec<Book>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 10);
        assert_eq!(params, SearchParams::default());
    }

    #[test]
    fn test_query_pairs_skip_empty_filters() {
        let params = SearchParams {
            keyword: Some("dune".into()),
            category: Some(String::new()),
            ..SearchParams::default()
        };
        assert_eq!(
            params.query_pairs(),
            vec![
                ("keyword", "dune".to_string()),
                ("page", "0".to_string()),
                ("size", "10".to_string()),
            ]
        );
    }
}
