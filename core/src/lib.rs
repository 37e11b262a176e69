//! # Quill Core
//!
//! Core business logic and domain layer for the Quill blogging backend.
//! This crate contains domain entities, the token and session services,
//! repository interfaces, and error types that the infrastructure and API
//! crates build on.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::entities::{
    Account, Blog, BlogStatus, IssuedRefreshRecord, TokenKind, TokenPair, TokenPayload,
    VerifyStatus,
};
pub use domain::value_objects::{AccountUpdate, AuthResponse, BlogQuery, BlogUpdate};
pub use errors::{
    AuthError, BlogError, DomainError, DomainResult, TokenError, ValidationError,
};
pub use repositories::{AccountRepository, BlogRepository, TokenRepository};
