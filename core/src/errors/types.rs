//! Domain-specific error types for tokens, authentication, blogs and input validation
//!
//! Messages here are safe to show to clients: none of them embeds a token string.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Token codec and credential store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature, structure or standard claims did not check out
    #[error("Token malformed")]
    Malformed,

    /// Signature is valid but the token was minted for another purpose
    #[error("Token kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: TokenKind, found: TokenKind },

    #[error("Token expired")]
    Expired,

    /// No signing secret configured for the kind
    #[error("Signing secret not configured for {kind} tokens")]
    MissingSecret { kind: TokenKind },

    #[error("Token generation failed")]
    GenerationFailed,

    /// Signature-valid refresh token with no live record in the store
    #[error("Refresh token is not active")]
    NotInStore,

    /// The store already holds a record for this exact token
    #[error("Duplicate refresh token")]
    DuplicateToken,
}

impl TokenError {
    /// Misconfiguration and integrity violations, as opposed to caller mistakes
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TokenError::MissingSecret { .. } | TokenError::DuplicateToken | TokenError::GenerationFailed
        )
    }
}

/// Authentication and account lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bearer failed the signature or store check; the cause is kept as the source
    #[error("Unauthenticated")]
    Unauthenticated(#[source] TokenError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Account banned")]
    AccountBanned,

    #[error("Account not found")]
    AccountNotFound,

    /// Presented action token is not the one currently stored on the account
    #[error("Action token does not match the latest issued token")]
    ActionTokenMismatch,

    #[error("Action token already used")]
    ActionAlreadyConsumed,
}

impl AuthError {
    /// The codec or store failure behind an `Unauthenticated` error
    pub fn token_cause(&self) -> Option<&TokenError> {
        match self {
            AuthError::Unauthenticated(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Blog resource errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("Blog not found")]
    NotFound,

    #[error("Only the author may modify this blog")]
    NotOwner,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must contain lowercase, uppercase, number and symbol characters")]
    WeakPassword,

    #[error("Password confirmation does not match")]
    PasswordConfirmationMismatch,
}
