use std::{future::Future, sync::Arc, time::Duration};

use serde::Serialize;

use crate::{
    core::{FeatureExtractor, ResultSearcher},
    error::{Failure, FailureResult},
    models::{ClothingFeatures, SearchResult},
};

#[derive(Serialize, Debug)]
pub struct Findings {
    pub features: ClothingFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchResult>>,
}

/// Runs analysis and search one after the other, each bounded by a timeout.
pub struct Finder {
    extractor: Arc<FeatureExtractor>,
    searcher: Arc<ResultSearcher>,
    timeout: Duration,
}

async fn bounded<T>(
    provider: &'static str,
    timeout: Duration,
    call: impl Future<Output = FailureResult<T>>,
) -> FailureResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            log::error!("{} call timed out after {:?}", provider, timeout);
            Err(Failure::provider(
                provider,
                format!("no answer within {}s", timeout.as_secs()),
            ))
        }
    }
}

impl Finder {
    pub(crate) fn new(
        extractor: Arc<FeatureExtractor>,
        searcher: Arc<ResultSearcher>,
        timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            searcher,
            timeout,
        }
    }

    pub async fn find(&self, image: &str, with_search: bool) -> FailureResult<Findings> {
        let features = bounded(
            "Anthropic",
            self.timeout,
            self.extractor.extract_features(image),
        )
        .await?;

        if !with_search {
            return Ok(Findings {
                features,
                results: None,
            });
        }

        let results = bounded("SerpApi", self.timeout, self.searcher.search(&features)).await?;

        Ok(Findings {
            features,
            results: Some(results),
        })
    }
}
