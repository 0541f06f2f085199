use actix_web::{Resource, web};
use serde_json::{Value, json};

async fn index() -> web::Json<Value> {
    web::Json(json!({
        "message": "AI Clothing Recommender API",
        "endpoints": ["/api/analyze", "/api/search"]
    }))
}

pub(crate) fn resource() -> Resource {
    web::resource("/").route(web::get().to(index))
}
