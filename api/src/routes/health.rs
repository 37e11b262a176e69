use actix_web::HttpResponse;

use quill_shared::types::HealthResponse;

/// Handler for GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
