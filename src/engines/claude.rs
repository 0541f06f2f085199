use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    engines::VisionModel,
    error::{Failure, FailureResult},
    files::ImageSource,
};

const API_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "Anthropic";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [ContentBlock<'a>; 2],
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Image { source: ImageBlock<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize, Debug)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone, Debug)]
pub struct Claude {
    client: Client,
    token: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl Claude {
    pub(crate) fn new(config: &config::Anthropic) -> Self {
        Self {
            client: Client::new(),
            token: config.token.clone().filter(|token| !token.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    fn failure(status: reqwest::StatusCode, body: &str) -> Failure {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => response.error.message,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body.to_string(),
        };

        Failure::UpstreamProvider {
            provider: PROVIDER,
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Text of the first text block. Image or tool blocks are skipped.
fn first_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .unwrap_or_default()
}

#[async_trait]
impl VisionModel for Claude {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn credential(&self) -> &'static str {
        "ANTHROPIC_API_KEY"
    }

    fn configured(&self) -> bool {
        self.token.is_some()
    }

    async fn describe(&self, image: &ImageSource, prompt: &str) -> FailureResult<String> {
        let Some(token) = self.token.as_deref() else {
            return Err(Failure::NotConfigured(self.credential()));
        };

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: [
                    ContentBlock::Image {
                        source: ImageBlock {
                            kind: "base64",
                            media_type: &image.media_type,
                            data: &image.data,
                        },
                    },
                    ContentBlock::Text { text: prompt },
                ],
            }],
        };

        log::info!(
            "Asking {} to describe a {} image ({} bytes base64)",
            self.model,
            image.media_type,
            image.data.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", token)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Failure::provider(PROVIDER, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Failure::provider(PROVIDER, e.to_string()))?;

        if !status.is_success() {
            return Err(Self::failure(status, &body));
        }

        log::debug!("Claude response: {}", body);
        let response: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            Failure::provider(PROVIDER, format!("Unexpected messages response: {}", e))
        })?;

        Ok(first_text(response))
    }
}
