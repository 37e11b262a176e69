//! Credential store trait for issued refresh tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::IssuedRefreshRecord;
use crate::errors::DomainError;

/// Durable record of outstanding refresh credentials, keyed by the exact token string.
///
/// Implementations must never return a record whose `expires_at` has passed,
/// whether they prune eagerly or filter at read time.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly issued refresh record
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(DomainError::Token(TokenError::DuplicateToken))` - A record with the same token exists
    async fn insert(&self, record: IssuedRefreshRecord) -> Result<(), DomainError>;

    /// Look up a live record by exact token string
    ///
    /// No prefix or fuzzy matching; the token is both the key and the credential.
    async fn find_exact(&self, token: &str) -> Result<Option<IssuedRefreshRecord>, DomainError>;

    /// Delete the record for an exact token string
    ///
    /// # Returns
    /// * `Ok(n)` - Number of records removed, `0` if none matched
    async fn delete_exact(&self, token: &str) -> Result<u64, DomainError>;

    /// Remove every record that expired at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of live records for a subject (one per signed-in device)
    async fn count_for_subject(&self, subject_id: Uuid) -> Result<usize, DomainError>;

    /// Whether a live record exists for the token
    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.find_exact(token).await?.is_some())
    }
}
