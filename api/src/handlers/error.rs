//! Translation of domain failures into HTTP responses
//!
//! Every error body is a `quill_shared::ErrorResponse`. Messages come from a
//! fixed table, so no token string can reach a client through an error.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use quill_core::errors::{AuthError, BlogError, DomainError, TokenError};
use quill_shared::errors::{error_codes, ErrorResponse};
use std::fmt;
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Errors a handler or middleware can return
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No usable `Authorization: Bearer` header
    #[error("Missing bearer token")]
    MissingBearer,

    /// Request DTO failed its `validator` rules
    #[error("Invalid request body")]
    InvalidInput(#[from] ValidationErrors),

    /// Body, query or path could not be parsed. The parser's reason may
    /// quote request content, so it is logged and not returned.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn bad_request(reason: impl fmt::Display) -> Self {
        ApiError::BadRequest(reason.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => classify(error).0,
            ApiError::MissingBearer => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Domain(error) => {
                let (_, code, message) = classify(error);
                if status.is_server_error() {
                    tracing::error!(error = %error, "Request failed with an internal error");
                }
                ErrorResponse::new(code, message)
            }
            ApiError::MissingBearer => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "Authorization header is required")
            }
            ApiError::InvalidInput(errors) => validation_response(errors),
            ApiError::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "Rejected unparsable request");
                ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request")
            }
            ApiError::RouteNotFound => {
                ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
            }
        };

        HttpResponse::build(status).json(body)
    }
}

/// Map a domain error to an HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::Domain(error).error_response()
}

/// Status, error code and client-facing message for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Token(token_error) => classify_token(token_error),

        DomainError::Auth(auth_error) => match auth_error {
            AuthError::Unauthenticated(cause) => match cause {
                TokenError::Expired => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::TOKEN_EXPIRED,
                    "Token expired".to_string(),
                ),
                cause if cause.is_fatal() => internal(),
                _ => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::UNAUTHORIZED,
                    "Invalid or inactive token".to_string(),
                ),
            },
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                auth_error.to_string(),
            ),
            AuthError::EmailNotVerified => (
                StatusCode::FORBIDDEN,
                error_codes::EMAIL_NOT_VERIFIED,
                auth_error.to_string(),
            ),
            AuthError::AccountBanned => (
                StatusCode::FORBIDDEN,
                error_codes::ACCOUNT_BANNED,
                auth_error.to_string(),
            ),
            AuthError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                error_codes::EMAIL_ALREADY_EXISTS,
                auth_error.to_string(),
            ),
            AuthError::AccountNotFound => (
                StatusCode::NOT_FOUND,
                error_codes::ACCOUNT_NOT_FOUND,
                auth_error.to_string(),
            ),
            AuthError::ActionTokenMismatch => (
                StatusCode::BAD_REQUEST,
                error_codes::ACTION_TOKEN_MISMATCH,
                auth_error.to_string(),
            ),
            AuthError::ActionAlreadyConsumed => (
                StatusCode::BAD_REQUEST,
                error_codes::ACTION_ALREADY_CONSUMED,
                auth_error.to_string(),
            ),
        },

        DomainError::Blog(blog_error) => match blog_error {
            BlogError::NotFound => (
                StatusCode::NOT_FOUND,
                error_codes::BLOG_NOT_FOUND,
                blog_error.to_string(),
            ),
            BlogError::NotOwner => (
                StatusCode::FORBIDDEN,
                error_codes::NOT_BLOG_OWNER,
                blog_error.to_string(),
            ),
        },

        DomainError::Validation(validation_error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::VALIDATION_ERROR,
            validation_error.to_string(),
        ),

        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),

        DomainError::Internal { .. } => internal(),
    }
}

fn classify_token(token_error: &TokenError) -> (StatusCode, &'static str, String) {
    match token_error {
        TokenError::Expired => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Token expired".to_string(),
        ),
        TokenError::Malformed | TokenError::KindMismatch { .. } | TokenError::NotInStore => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid token".to_string(),
        ),
        TokenError::MissingSecret { .. }
        | TokenError::GenerationFailed
        | TokenError::DuplicateToken => internal(),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        INTERNAL_MESSAGE.to_string(),
    )
}

fn validation_response(errors: &ValidationErrors) -> ErrorResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::entities::token::TokenKind;
    use quill_core::errors::ValidationError;

    fn status_of(error: DomainError) -> StatusCode {
        ApiError::from(error).status_code()
    }

    #[test]
    fn test_token_failures_are_unauthorized() {
        assert_eq!(status_of(TokenError::Malformed.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(TokenError::Expired.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(DomainError::unauthenticated(TokenError::NotInStore)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_configuration_failures_are_opaque() {
        let error: DomainError = TokenError::MissingSecret {
            kind: TokenKind::Refresh,
        }
        .into();
        assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_of(DomainError::internal("connection reset")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_account_state_mapping() {
        assert_eq!(status_of(AuthError::EmailNotVerified.into()), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AuthError::AccountBanned.into()), StatusCode::FORBIDDEN);
        assert_eq!(status_of(BlogError::NotOwner.into()), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AuthError::EmailAlreadyExists.into()), StatusCode::CONFLICT);
        assert_eq!(status_of(AuthError::AccountNotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AuthError::ActionAlreadyConsumed.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ValidationError::WeakPassword.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[actix_web::test]
    async fn test_internal_message_is_generic() {
        let response = handle_domain_error(DomainError::internal("Failed to find refresh token: io"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "INTERNAL_ERROR");
        assert_eq!(json["message"], INTERNAL_MESSAGE);
    }
}
