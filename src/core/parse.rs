use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::{Failure, FailureResult},
    models::ClothingFeatures,
};

static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("invalid fence regex")
});

/// The JSON candidate inside a model answer: the first fenced `{...}` block if
/// there is one, the whole text otherwise.
pub(crate) fn json_candidate(text: &str) -> &str {
    FENCED_OBJECT
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or(text, |object| object.as_str())
}

fn missing_required(value: &Value) -> Option<&'static str> {
    let non_empty_text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|text| !text.is_empty())
    };
    let non_empty_list = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_array)
            .is_some_and(|items| !items.is_empty())
    };

    if !non_empty_text("type") {
        Some("type")
    } else if !non_empty_list("color") {
        Some("color")
    } else if !non_empty_list("style") {
        Some("style")
    } else {
        None
    }
}

/// Parse a free-form model answer into features.
///
/// Text that is not JSON is an [`Failure::UpstreamParse`]; JSON without a usable
/// `type`, `color` and `style` is an [`Failure::InvalidUpstreamSchema`].
pub(crate) fn parse_features(text: &str) -> FailureResult<ClothingFeatures> {
    let candidate = json_candidate(text);

    let value: Value = serde_json::from_str(candidate).map_err(|source| {
        log::error!("Failed to parse AI response: {}", source);
        Failure::UpstreamParse {
            raw: text.to_string(),
            source,
        }
    })?;

    if let Some(field) = missing_required(&value) {
        return Err(Failure::InvalidUpstreamSchema {
            reason: format!("missing or empty `{}`", field),
            details: value,
        });
    }

    serde_json::from_value(value.clone()).map_err(|e| Failure::InvalidUpstreamSchema {
        reason: e.to_string(),
        details: value,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::FailureKind;

    use super::*;

    const SHIRT: &str = r#"{"type":"shirt","color":["blue"],"style":["casual"],"pattern":"solid","material":"cotton","description":"a shirt"}"#;

    #[test]
    fn test_fenced_json() {
        let text = format!("```json\n{} \n```", SHIRT);
        let features = parse_features(&text).unwrap();

        assert_eq!(features.kind, "shirt");
        assert_eq!(features.pattern, "solid");
        assert_eq!(features.brand, None);
    }

    #[test]
    fn test_bare_json_matches_fenced() {
        let fenced = parse_features(&format!("```json\n{} \n```", SHIRT)).unwrap();
        let bare = parse_features(SHIRT).unwrap();
        assert_eq!(fenced, bare);
    }

    #[test]
    fn test_untagged_fence_inside_prose() {
        let text = format!(
            "Here is the analysis you asked for:\n```\n{}\n```\nLet me know if you need more.",
            SHIRT
        );
        assert_eq!(parse_features(&text).unwrap().kind, "shirt");
    }

    #[test]
    fn test_fence_with_nested_object() {
        let text = "```json\n{\"type\":\"coat\",\"color\":[\"tan\"],\"style\":[\"classic\"],\"extra\":{\"lining\":\"silk\"}}\n```";
        let features = parse_features(text).unwrap();
        assert_eq!(features.kind, "coat");
    }

    #[test]
    fn test_json_candidate_without_fence() {
        assert_eq!(json_candidate("just words"), "just words");
        assert_eq!(json_candidate("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_prose_is_parse_error() {
        let text = "This appears to be a blue casual shirt made of cotton.";
        let err = parse_features(text).unwrap_err();

        assert_eq!(err.kind(), FailureKind::UpstreamParseError);
        assert_eq!(err.details(), Some(Value::String(text.to_string())));
    }

    #[test]
    fn test_missing_color_is_schema_error() {
        let text = r#"{"type":"shirt","style":["casual"],"pattern":"solid"}"#;
        let err = parse_features(text).unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidUpstreamSchema);
        assert_eq!(err.details().unwrap()["type"], "shirt");
    }

    #[test]
    fn test_empty_required_fields_are_schema_errors() {
        for text in [
            r#"{"type":"","color":["red"],"style":["chic"]}"#,
            r#"{"type":"dress","color":[],"style":["chic"]}"#,
            r#"{"type":"dress","color":["red"],"style":[]}"#,
            r#"{"type":"dress","color":"red","style":["chic"]}"#,
            r#"["not", "an", "object"]"#,
        ] {
            let err = parse_features(text).unwrap_err();
            assert_eq!(err.kind(), FailureKind::InvalidUpstreamSchema, "{}", text);
        }
    }

    #[test]
    fn test_wrong_element_types_are_schema_errors() {
        let err = parse_features(r#"{"type":"dress","color":[1],"style":["chic"]}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidUpstreamSchema);
    }

    #[test]
    fn test_null_optional_attributes_are_accepted() {
        let text = r#"{"type":"shirt","color":["blue"],"style":["casual"],"pattern":null,"material":null,"brand":null,"description":"a shirt"}"#;
        let features = parse_features(text).unwrap();

        assert_eq!(features.kind, "shirt");
        assert_eq!(features.pattern, "");
        assert_eq!(features.material, "");
        assert_eq!(features.brand, None);
        assert_eq!(features.description, "a shirt");
    }

    #[test]
    fn test_brand_kept_when_present() {
        let text = r#"{"type":"sneaker","color":["white"],"style":["sporty"],"pattern":"solid","material":"leather","brand":"Nike","description":"low top"}"#;
        assert_eq!(parse_features(text).unwrap().brand.as_deref(), Some("Nike"));
    }
}
