//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod account_repository_impl;
pub mod blog_repository_impl;
pub mod token_repository_impl;

// Re-export the MySQL implementations
pub use account_repository_impl::MySqlAccountRepository;
pub use blog_repository_impl::MySqlBlogRepository;
pub use token_repository_impl::MySqlTokenRepository;

use quill_core::errors::DomainError;

/// Column read failure as an internal error
fn db_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
