use serde_json::Value;

pub mod client;

pub use client::BrightDataClient;

/// One organic result from a SERP response.
///
/// The upstream API is inconsistent about field names: the URL arrives under
/// `url` or `link`, the snippet under `snippet` or `description`. Missing
/// fields default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
        }
    }

    /// Build a result from a raw API object, applying field fallbacks.
    pub fn from_value(value: &Value) -> Self {
        fn text(value: &Value, key: &str) -> Option<String> {
            value.get(key).and_then(Value::as_str).map(str::to_string)
        }

        Self {
            url: text(value, "url")
                .or_else(|| text(value, "link"))
                .unwrap_or_default(),
            title: text(value, "title").unwrap_or_default(),
            snippet: text(value, "snippet")
                .or_else(|| text(value, "description"))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_primary_keys() {
        let raw = json!({
            "url": "https://example.com/",
            "title": "Example",
            "snippet": "An example result",
        });

        let result = SearchResult::from_value(&raw);
        assert_eq!(result.url, "https://example.com/");
        assert_eq!(result.title, "Example");
        assert_eq!(result.snippet, "An example result");
    }

    #[test]
    fn test_from_value_fallback_keys() {
        let raw = json!({
            "link": "https://example.com/page",
            "title": "Example",
            "description": "Described elsewhere",
        });

        let result = SearchResult::from_value(&raw);
        assert_eq!(result.url, "https://example.com/page");
        assert_eq!(result.snippet, "Described elsewhere");
    }

    #[test]
    fn test_from_value_primary_key_wins_over_fallback() {
        let raw = json!({
            "url": "https://primary.example/",
            "link": "https://fallback.example/",
            "snippet": "primary",
            "description": "fallback",
        });

        let result = SearchResult::from_value(&raw);
        assert_eq!(result.url, "https://primary.example/");
        assert_eq!(result.snippet, "primary");
    }

    #[test]
    fn test_from_value_missing_fields_default_to_empty() {
        let result = SearchResult::from_value(&json!({}));
        assert_eq!(result.url, "");
        assert_eq!(result.title, "");
        assert_eq!(result.snippet, "");
    }
}
