use crate::{
    core::parse::parse_features,
    engines::{BoxedVisionModel, VisionModel},
    error::{Failure, FailureResult},
    files::ImageSource,
    models::ClothingFeatures,
};

pub(crate) const PROMPT: &str = r#"Analyze this clothing item in detail. Extract the following information:

1. Type of clothing (e.g., t-shirt, jeans, dress, jacket, etc.)
2. Main colors (list up to 3)
3. Style keywords (e.g., casual, formal, vintage, modern, sporty, etc.)
4. Pattern (e.g., solid, striped, floral, plaid, etc.)
5. Material/fabric (e.g., cotton, denim, leather, silk, etc.)
6. Brand (if visible in the image, otherwise null)
7. A brief description of the item

Return the response as a single JSON object in the following format:
{
    "type": "clothing type",
    "color": ["color1", "color2"],
    "style": ["style1", "style2", "style3"],
    "pattern": "pattern description",
    "material": "material type",
    "brand": "brand name" or null,
    "description": "Brief description of the clothing item"
}

Only return the JSON, no additional text."#;

/// Turns an uploaded image into [`ClothingFeatures`] with one model call.
pub struct FeatureExtractor {
    model: BoxedVisionModel,
}

impl FeatureExtractor {
    pub(crate) fn new(model: BoxedVisionModel) -> Self {
        Self { model }
    }

    pub fn ensure_configured(&self) -> FailureResult<()> {
        if self.model.configured() {
            Ok(())
        } else {
            Err(Failure::NotConfigured(self.model.credential()))
        }
    }

    /// `image` is a data url or a bare base64 jpeg payload.
    pub async fn extract_features(&self, image: &str) -> FailureResult<ClothingFeatures> {
        self.ensure_configured()?;

        let image = ImageSource::parse(image);
        log::info!("Analyzing {} image with {}", image.media_type, self.model.name());

        let text = self.model.describe(&image, PROMPT).await?;
        log::debug!("Model answered: {}", text);

        let features = parse_features(&text)?;
        log::info!(
            "Detected {} ({} colors, {} style keywords)",
            features.kind,
            features.color.len(),
            features.style.len()
        );

        Ok(features)
    }
}
