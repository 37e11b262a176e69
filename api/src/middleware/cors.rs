//! CORS middleware configuration for cross-origin requests.
//!
//! Allowed origins come from `CorsConfig`; development allows any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use quill_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// A `*` entry allows any origin and disables credentials.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS configured to allow any origin");
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
