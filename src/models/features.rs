use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured description of a single garment, as reported by the vision model.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingFeatures {
    /// Garment category, e.g. "t-shirt" or "dress"
    #[serde(rename = "type")]
    pub kind: String,
    /// Main colors, primary first
    #[serde(default)]
    pub color: Vec<String>,
    /// Style keywords, most characteristic first
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub pattern: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub material: String,
    /// Only set when a brand is visible in the image
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
}

/// `null` is absent, other non-string values are stringified.
fn loose_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(loose_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(loose_text(Value::deserialize(deserializer)?))
}

impl ClothingFeatures {
    pub fn primary_color(&self) -> Option<&str> {
        self.color.first().map(String::as_str)
    }

    pub fn primary_style(&self) -> Option<&str> {
        self.style.first().map(String::as_str)
    }

    pub fn is_solid(&self) -> bool {
        self.pattern.eq_ignore_ascii_case("solid")
    }
}
