//! Application state and factory
//!
//! This module holds the shared services and builds the Actix-web
//! application with every `/api/v1` route.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use quill_core::repositories::{AccountRepository, BlogRepository, TokenRepository};
use quill_core::services::{AuthService, BlogService, Mailer};
use quill_shared::config::{CorsConfig, ServerConfig};

use crate::handlers::ApiError;
use crate::middleware::{create_cors, AccessTokenVerifier, JwtAuth};
use crate::routes::{blogs, health, users};

/// Services shared by every worker
pub struct AppState<A, R, M, B>
where
    A: AccountRepository,
    R: TokenRepository,
    M: Mailer,
    B: BlogRepository,
{
    pub auth_service: Arc<AuthService<A, R, M>>,
    pub blog_service: Arc<BlogService<B>>,
}

impl<A, R, M, B> AppState<A, R, M, B>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    pub fn new(auth_service: Arc<AuthService<A, R, M>>, blog_service: Arc<BlogService<B>>) -> Self {
        Self {
            auth_service,
            blog_service,
        }
    }

    /// Bearer validation backed by the same session manager the auth flows use
    pub fn verifier(&self) -> Arc<dyn AccessTokenVerifier> {
        self.auth_service.sessions().clone()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<A, R, M, B>(
    app_state: web::Data<AppState<A, R, M, B>>,
    server: &ServerConfig,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let auth = JwtAuth::new(app_state.verifier());

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(server.max_payload_size)
                .error_handler(|err, _req| ApiError::bad_request(err).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::bad_request(err).into()),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err, _req| ApiError::bad_request(err).into()),
        )
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health::health_check))
                .service(users::scope::<A, R, M, B>(auth.clone()))
                .service(blogs::scope::<A, R, M, B>(auth)),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::RouteNotFound)
}
