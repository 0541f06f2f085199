use actix_web::{Resource, web};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Failure, FailureResult},
    handlers::{Services, take_field},
    models::ClothingFeatures,
};

#[derive(Serialize, Debug)]
pub(crate) struct AnalyzeResponse {
    features: ClothingFeatures,
}

async fn analyze(
    services: web::Data<Services>,
    body: web::Json<Value>,
) -> FailureResult<web::Json<AnalyzeResponse>> {
    services.extractor.ensure_configured()?;

    // Data url or bare base64 payload
    let mut body = body.into_inner();
    let image = match take_field::<String>(&mut body, "image")? {
        Some(image) if !image.is_empty() => image,
        _ => return Err(Failure::InvalidInput("Image data is required".to_string())),
    };

    let features = services.extractor.extract_features(&image).await?;

    Ok(web::Json(AnalyzeResponse { features }))
}

pub(crate) fn resource() -> Resource {
    web::resource("/api/analyze").route(web::post().to(analyze))
}
