use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    engines::ShoppingEngine,
    error::{Failure, FailureResult},
};

const PROVIDER: &str = "SerpApi";

#[derive(Clone, Debug)]
pub struct SerpApi {
    client: Client,
    token: Option<String>,
    base_url: String,
    engine: String,
}

impl SerpApi {
    pub(crate) fn new(config: &config::SerpApi) -> Self {
        Self {
            client: Client::new(),
            token: config.token.clone().filter(|token| !token.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            engine: config.engine.clone(),
        }
    }
}

fn error_message(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}

#[async_trait]
impl ShoppingEngine for SerpApi {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    fn credential(&self) -> &'static str {
        "SERPAPI_KEY"
    }

    fn configured(&self) -> bool {
        self.token.is_some()
    }

    async fn search(&self, query: &str, num: usize) -> FailureResult<Vec<Value>> {
        let Some(token) = self.token.as_deref() else {
            return Err(Failure::NotConfigured(self.credential()));
        };

        log::debug!("GET {}/search.json ({}): {}", self.base_url, self.engine, query);
        let num = num.to_string();
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", token),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Failure::provider(PROVIDER, e.without_url().to_string()))?;

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(Failure::provider(
                    PROVIDER,
                    format!("Unexpected search response: {}", e.without_url()),
                ));
            }
            Err(_) => Value::Null,
        };

        if !status.is_success() {
            let message = error_message(&body)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(Failure::provider(PROVIDER, message));
        }

        // Zero matches come back as a 200 with an `error` field
        if let Some(message) = error_message(&body) {
            log::info!("{} reported: {}", self.engine, message);
        }

        let listings = match body.get("shopping_results") {
            Some(Value::Array(listings)) => listings.clone(),
            _ => vec![],
        };

        log::debug!("{} returned {} raw listings", self.engine, listings.len());
        Ok(listings)
    }
}
