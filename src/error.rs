use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type FailureResult<T> = Result<T, Failure>;

#[derive(strum_macros::Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    NotConfigured,
    InvalidInput,
    UpstreamParseError,
    InvalidUpstreamSchema,
    UpstreamProviderError,
}

#[derive(Error, Debug)]
pub enum Failure {
    /// A provider credential is missing, detected before any network call
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// A required request field is missing or unusable
    #[error("{0}")]
    InvalidInput(String),

    /// The model answered with something that is not JSON, even after fence stripping
    #[error("Failed to parse AI response")]
    UpstreamParse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model answered with JSON that lacks the required attributes
    #[error("Invalid response from AI")]
    InvalidUpstreamSchema { reason: String, details: Value },

    /// Network, auth, quota or timeout failure from an external provider
    #[error("{provider} API error: {message}")]
    UpstreamProvider {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },
}

#[derive(Serialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::NotConfigured(_) => FailureKind::NotConfigured,
            Failure::InvalidInput(_) => FailureKind::InvalidInput,
            Failure::UpstreamParse { .. } => FailureKind::UpstreamParseError,
            Failure::InvalidUpstreamSchema { .. } => FailureKind::InvalidUpstreamSchema,
            Failure::UpstreamProvider { .. } => FailureKind::UpstreamProviderError,
        }
    }

    pub(crate) fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Failure::UpstreamProvider {
            provider,
            status: None,
            message: message.into(),
        }
    }

    /// Diagnostics attached to the failure. Never a partial result.
    pub fn details(&self) -> Option<Value> {
        match self {
            Failure::UpstreamParse { raw, .. } => Some(Value::String(raw.clone())),
            Failure::InvalidUpstreamSchema { details, .. } => Some(details.clone()),
            _ => None,
        }
    }

    pub(crate) fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
        }
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        match self {
            Failure::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Failure::UpstreamProvider {
                status: Some(status),
                ..
            } => StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_client_error() {
            log::warn!("{} ({}): {}", self.kind(), status, self);
        } else {
            log::error!("{} ({}): {}", self.kind(), status, self);
        }

        HttpResponse::build(status).json(self.body())
    }
}
