//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::token::IssuedRefreshRecord;
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// Mock token repository for testing
#[derive(Clone)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<String, IssuedRefreshRecord>>>,
    clock: Arc<dyn Clock>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Every stored record, expired ones included
    pub async fn raw_len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, record: IssuedRefreshRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token) {
            return Err(TokenError::DuplicateToken.into());
        }
        records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn find_exact(&self, token: &str) -> Result<Option<IssuedRefreshRecord>, DomainError> {
        let now = self.clock.now();
        let records = self.records.read().await;
        Ok(records
            .get(token)
            .filter(|r| !r.is_expired_at(now))
            .cloned())
    }

    async fn delete_exact(&self, token: &str) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(token).map_or(0, |_| 1))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired_at(now));
        Ok(before - records.len())
    }

    async fn count_for_subject(&self, subject_id: Uuid) -> Result<usize, DomainError> {
        let now = self.clock.now();
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.subject_id == subject_id && !r.is_expired_at(now))
            .count())
    }
}
