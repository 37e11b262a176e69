//! Unit tests for domain error types

use std::error::Error as _;

use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, BlogError, DomainError, TokenError, ValidationError};

#[test]
fn test_unauthenticated_keeps_cause_as_source() {
    let error = AuthError::Unauthenticated(TokenError::NotInStore);

    assert_eq!(error.token_cause(), Some(&TokenError::NotInStore));
    let source = error.source().expect("source should be set");
    assert_eq!(source.to_string(), "Refresh token is not active");
}

#[test]
fn test_domain_error_bridges() {
    let error: DomainError = TokenError::Expired.into();
    assert!(matches!(error, DomainError::Token(TokenError::Expired)));

    let error: DomainError = BlogError::NotOwner.into();
    assert!(matches!(error, DomainError::Blog(BlogError::NotOwner)));

    let error = DomainError::unauthenticated(TokenError::Malformed);
    assert!(matches!(
        error,
        DomainError::Auth(AuthError::Unauthenticated(TokenError::Malformed))
    ));
}

#[test]
fn test_kind_mismatch_message_names_both_kinds() {
    let error = TokenError::KindMismatch {
        expected: TokenKind::Refresh,
        found: TokenKind::Access,
    };
    assert_eq!(
        error.to_string(),
        "Token kind mismatch: expected refresh, found access"
    );
}

#[test]
fn test_fatal_token_errors() {
    assert!(TokenError::DuplicateToken.is_fatal());
    assert!(TokenError::MissingSecret { kind: TokenKind::Access }.is_fatal());
    assert!(!TokenError::Expired.is_fatal());
    assert!(!TokenError::Malformed.is_fatal());
}

#[test]
fn test_validation_messages() {
    let error = ValidationError::InvalidLength {
        field: "title".to_string(),
        min: 3,
        max: 200,
    };
    assert_eq!(error.to_string(), "Invalid length: title (min: 3, max: 200)");
}
