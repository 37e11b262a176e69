//! Bearer authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the access token from the `Authorization` header,
//! validates it with the session manager and injects an [`AuthContext`] into
//! the request extensions. Access tokens are checked by signature and expiry
//! only; the credential store is not consulted.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use quill_core::domain::entities::account::VerifyStatus;
use quill_core::domain::entities::token::TokenPayload;
use quill_core::errors::DomainResult;
use quill_core::repositories::TokenRepository;
use quill_core::services::{Actor, SessionManager};

use crate::handlers::ApiError;

/// Caller identity injected into requests that passed bearer validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Account id from the `sub` claim
    pub user_id: Uuid,
    /// Verification status baked into the access token
    pub verify_status: VerifyStatus,
}

impl AuthContext {
    pub fn from_payload(payload: &TokenPayload) -> Self {
        Self {
            user_id: payload.sub,
            verify_status: payload.verify,
        }
    }

    /// The caller as the blog service sees it
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            verify_status: self.verify_status,
        }
    }
}

/// Object-safe view of access-token validation, so the middleware does not
/// carry the store type parameter
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> DomainResult<TokenPayload>;
}

impl<R: TokenRepository> AccessTokenVerifier for SessionManager<R> {
    fn verify_access_token(&self, token: &str) -> DomainResult<TokenPayload> {
        self.validate_bearer(token)
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Bearer authentication middleware service
///
/// Rejections are answered here with the JSON error body instead of being
/// passed up as an `Err`.
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or(ApiError::MissingBearer)
                .and_then(|token| verifier.verify_access_token(&token).map_err(ApiError::from));

            match verified {
                Ok(payload) => {
                    req.extensions_mut()
                        .insert(AuthContext::from_payload(&payload));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    tracing::debug!(path = %req.path(), "Bearer rejected: {}", error);
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for routes wrapped in [`JwtAuth`]
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::MissingBearer.into());

        ready(result)
    }
}
