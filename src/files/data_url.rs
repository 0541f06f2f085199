use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^data:([^;]+);base64,(.+)$").expect("invalid data url regex"));

/// An inline image ready to be handed to the vision model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub media_type: String,
    /// Base64 payload, passed through untouched
    pub data: String,
}

impl ImageSource {
    /// Split a `data:<mime>;base64,<payload>` url. Anything else is taken as a raw
    /// base64 jpeg payload. The media type is not checked against a fixed list.
    pub fn parse(image: &str) -> Self {
        if image.starts_with("data:")
            && let Some(captures) = DATA_URL.captures(image)
        {
            return Self {
                media_type: captures[1].to_string(),
                data: captures[2].to_string(),
            };
        }

        Self {
            media_type: mime::IMAGE_JPEG.to_string(),
            data: image.to_string(),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}
