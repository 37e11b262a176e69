//! In-memory credential store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::clock::{Clock, SystemClock};
use quill_core::domain::entities::token::IssuedRefreshRecord;
use quill_core::errors::{DomainError, TokenError};
use quill_core::repositories::TokenRepository;

/// Refresh records keyed by exact token string. Expired records are hidden
/// from reads and dropped by `delete_expired`.
#[derive(Clone)]
pub struct InMemoryTokenRepository {
    records: Arc<RwLock<HashMap<String, IssuedRefreshRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, record: IssuedRefreshRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token) {
            tracing::error!(user_id = %record.subject_id, "Duplicate refresh token insert");
            return Err(TokenError::DuplicateToken.into());
        }
        records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn find_exact(&self, token: &str) -> Result<Option<IssuedRefreshRecord>, DomainError> {
        let now = self.clock.now();
        Ok(self
            .records
            .read()
            .await
            .get(token)
            .filter(|r| !r.is_expired_at(now))
            .cloned())
    }

    async fn delete_exact(&self, token: &str) -> Result<u64, DomainError> {
        Ok(self.records.write().await.remove(token).map_or(0, |_| 1))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired_at(now));
        Ok(before - records.len())
    }

    async fn count_for_subject(&self, subject_id: Uuid) -> Result<usize, DomainError> {
        let now = self.clock.now();
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.subject_id == subject_id && !r.is_expired_at(now))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quill_core::clock::FixedClock;

    fn record(subject_id: Uuid, token: &str, now: DateTime<Utc>, ttl: Duration) -> IssuedRefreshRecord {
        IssuedRefreshRecord {
            subject_id,
            token: token.to_string(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    #[tokio::test]
    async fn test_expired_records_are_invisible_then_pruned() {
        let clock = FixedClock::starting_now();
        let repo = InMemoryTokenRepository::with_clock(Arc::new(clock.clone()));
        let subject = Uuid::new_v4();
        let now = clock.now();

        repo.insert(record(subject, "short", now, Duration::minutes(5))).await.unwrap();
        repo.insert(record(subject, "long", now, Duration::days(1))).await.unwrap();
        assert_eq!(repo.count_for_subject(subject).await.unwrap(), 2);

        clock.advance(Duration::minutes(5));
        assert!(repo.find_exact("short").await.unwrap().is_none());
        assert!(repo.find_exact("long").await.unwrap().is_some());
        assert_eq!(repo.count_for_subject(subject).await.unwrap(), 1);

        assert_eq!(repo.delete_expired(clock.now()).await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_and_exact_delete() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        let subject = Uuid::new_v4();

        repo.insert(record(subject, "abc", now, Duration::hours(1))).await.unwrap();
        let err = repo
            .insert(record(subject, "abc", now, Duration::hours(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::DuplicateToken)));

        assert!(repo.find_exact("ab").await.unwrap().is_none());
        assert_eq!(repo.delete_exact("ab").await.unwrap(), 0);
        assert_eq!(repo.delete_exact("abc").await.unwrap(), 1);
        assert_eq!(repo.delete_exact("abc").await.unwrap(), 0);
    }
}
