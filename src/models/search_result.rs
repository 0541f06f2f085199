use serde::{Deserialize, Serialize};
use serde_json::Value;

const MISSING_PRICE: &str = "N/A";
const MISSING_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Listing title
    pub title: String,
    /// Formatted price as shown by the merchant
    pub price: String,
    /// Product page url
    pub link: String,
    /// Thumbnail url, empty when the provider has none
    pub image: String,
    /// Merchant or site name
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

fn text(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl SearchResult {
    /// Map one loosely typed shopping listing. Each field falls back on its own.
    pub fn from_listing(item: &Value) -> Self {
        Self {
            title: text(item, "title").unwrap_or_default(),
            price: text(item, "price").unwrap_or_else(|| MISSING_PRICE.to_string()),
            link: text(item, "link").unwrap_or_default(),
            image: text(item, "thumbnail").unwrap_or_default(),
            source: text(item, "source").unwrap_or_else(|| MISSING_SOURCE.to_string()),
            snippet: text(item, "snippet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_listing() {
        let result = SearchResult::from_listing(&json!({
            "position": 1,
            "title": "Levi's Trucker Jacket",
            "price": "$89.50",
            "extracted_price": 89.5,
            "link": "https://shop.example/trucker",
            "thumbnail": "https://img.example/trucker.jpg",
            "source": "Levi's",
            "snippet": "Classic fit"
        }));

        assert_eq!(
            result,
            SearchResult {
                title: "Levi's Trucker Jacket".into(),
                price: "$89.50".into(),
                link: "https://shop.example/trucker".into(),
                image: "https://img.example/trucker.jpg".into(),
                source: "Levi's".into(),
                snippet: Some("Classic fit".into()),
            }
        );
    }

    #[test]
    fn test_missing_price_and_thumbnail() {
        let result = SearchResult::from_listing(&json!({
            "title": "Plaid Flannel",
            "link": "https://shop.example/flannel",
            "source": "Shop"
        }));

        assert_eq!(result.price, "N/A");
        assert_eq!(result.image, "");
        assert_eq!(result.title, "Plaid Flannel");
        assert_eq!(result.link, "https://shop.example/flannel");
        assert_eq!(result.source, "Shop");
        assert_eq!(result.snippet, None);
    }

    #[test]
    fn test_wrong_types_degrade_per_field() {
        let result = SearchResult::from_listing(&json!({
            "title": 12,
            "price": "",
            "source": null,
            "snippet": ""
        }));

        assert_eq!(result.title, "");
        assert_eq!(result.price, "N/A");
        assert_eq!(result.source, "Unknown");
        assert_eq!(result.snippet, None);
    }

    #[test]
    fn test_non_object_listing() {
        let result = SearchResult::from_listing(&json!("garbage"));
        assert_eq!(result.price, "N/A");
        assert_eq!(result.source, "Unknown");
        assert_eq!(result.link, "");
    }

    #[test]
    fn test_snippet_omitted_when_absent() {
        let result = SearchResult::from_listing(&json!({"title": "Tee"}));
        let serialized = serde_json::to_value(&result).unwrap();
        assert!(serialized.get("snippet").is_none());
    }
}
