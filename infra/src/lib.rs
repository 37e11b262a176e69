//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and mailer traits defined in
//! `quill_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx
//! - **Memory**: process-local implementations for development and tests
//! - **Mail**: log-only and outbox mailers
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use quill_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory repositories
pub mod memory;

/// Mailer implementations
pub mod mail;

pub use mail::{LogMailer, OutboxMailer};
pub use memory::{InMemoryAccountRepository, InMemoryBlogRepository, InMemoryTokenRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
