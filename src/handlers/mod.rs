use std::sync::Arc;

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    core::{FeatureExtractor, ResultSearcher},
    error::{Failure, FailureResult},
};

pub(crate) mod analyze;
pub(crate) mod index;
pub(crate) mod search;

/// The two pipeline stages, shared read-only by every worker.
pub(crate) struct Services {
    pub extractor: Arc<FeatureExtractor>,
    pub searcher: Arc<ResultSearcher>,
}

pub(crate) fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            Failure::InvalidInput(format!("Invalid request body: {}", err)).into()
        })
}

/// Takes one field out of a request body. `null` counts as missing.
pub(crate) fn take_field<T: DeserializeOwned>(
    body: &mut Value,
    key: &str,
) -> FailureResult<Option<T>> {
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(|err| {
            Failure::InvalidInput(format!("Invalid request body: `{}`: {}", key, err))
        }),
    }
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index::resource())
        .service(analyze::resource())
        .service(search::resource());
}
