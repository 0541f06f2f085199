use actix_web::{Resource, web};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Failure, FailureResult},
    handlers::{Services, take_field},
    models::{ClothingFeatures, SearchResult},
};

#[derive(Serialize, Debug)]
pub(crate) struct SearchResponse {
    results: Vec<SearchResult>,
}

async fn search(
    services: web::Data<Services>,
    body: web::Json<Value>,
) -> FailureResult<web::Json<SearchResponse>> {
    services.searcher.ensure_configured()?;

    let mut body = body.into_inner();
    let Some(features) = take_field::<ClothingFeatures>(&mut body, "features")? else {
        return Err(Failure::InvalidInput("Features are required".to_string()));
    };

    let results = services.searcher.search(&features).await?;

    Ok(web::Json(SearchResponse { results }))
}

pub(crate) fn resource() -> Resource {
    web::resource("/api/search").route(web::post().to(search))
}
