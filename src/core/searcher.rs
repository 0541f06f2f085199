use crate::{
    config,
    engines::{BoxedShoppingEngine, ShoppingEngine},
    error::{Failure, FailureResult},
    models::{ClothingFeatures, SearchResult},
};

/// Derive a shopping query from the features.
///
/// The garment type always leads, followed by the primary color, the pattern
/// unless it is solid, and the primary style keyword.
pub fn build_query(features: &ClothingFeatures) -> String {
    let mut parts = vec![features.kind.as_str()];

    if let Some(color) = features.primary_color() {
        parts.push(color);
    }

    if !features.pattern.is_empty() && !features.is_solid() {
        parts.push(features.pattern.as_str());
    }

    if let Some(style) = features.primary_style() {
        parts.push(style);
    }

    parts.join(" ")
}

/// Looks up shoppable products for a set of features with one provider call.
pub struct ResultSearcher {
    engine: BoxedShoppingEngine,
    num: usize,
    limit: usize,
}

impl ResultSearcher {
    pub(crate) fn new(engine: BoxedShoppingEngine, config: &config::SerpApi) -> Self {
        Self {
            engine,
            num: config.num,
            limit: config.limit,
        }
    }

    pub fn ensure_configured(&self) -> FailureResult<()> {
        if self.engine.configured() {
            Ok(())
        } else {
            Err(Failure::NotConfigured(self.engine.credential()))
        }
    }

    pub async fn search(&self, features: &ClothingFeatures) -> FailureResult<Vec<SearchResult>> {
        self.ensure_configured()?;

        let query = build_query(features);
        log::info!("Searching {} for \"{}\"", self.engine.name(), query);

        let listings = self.engine.search(&query, self.num).await?;
        let results: Vec<SearchResult> = listings
            .iter()
            .take(self.limit)
            .map(SearchResult::from_listing)
            .collect();

        log::info!(
            "{} results kept from {} listings",
            results.len(),
            listings.len()
        );

        Ok(results)
    }
}
