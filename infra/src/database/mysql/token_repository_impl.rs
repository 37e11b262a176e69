//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh records are keyed by the SHA-256 of the exact token string, so the
//! table never holds a usable credential. Expired rows are filtered on read
//! and removed by `delete_expired`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use quill_core::clock::{Clock, SystemClock};
use quill_core::domain::entities::token::IssuedRefreshRecord;
use quill_core::errors::{DomainError, TokenError};
use quill_core::repositories::TokenRepository;

use super::{db_error, is_unique_violation};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Hash a token value using SHA-256
    ///
    /// # Returns
    /// Hexadecimal string representation of the SHA-256 hash
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// The row does not hold the token, so the caller's string is put back
    fn row_to_record(
        row: &sqlx::mysql::MySqlRow,
        token: &str,
    ) -> Result<IssuedRefreshRecord, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(db_error("user_id"))?;

        Ok(IssuedRefreshRecord {
            subject_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            token: token.to_string(),
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(db_error("issued_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(db_error("expires_at"))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn insert(&self, record: IssuedRefreshRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (token_hash, user_id, issued_at, expires_at)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&record.token))
            .bind(record.subject_id.to_string())
            .bind(record.issued_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    tracing::error!(user_id = %record.subject_id, "Duplicate refresh token insert");
                    DomainError::Token(TokenError::DuplicateToken)
                } else {
                    DomainError::internal(format!("Failed to save refresh token: {}", e))
                }
            })?;

        Ok(())
    }

    async fn find_exact(&self, token: &str) -> Result<Option<IssuedRefreshRecord>, DomainError> {
        let query = r#"
            SELECT user_id, issued_at, expires_at
            FROM refresh_tokens
            WHERE token_hash = ? AND expires_at > ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(token))
            .bind(self.clock.now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find refresh token: {}", e)))?;

        result.map(|row| Self::row_to_record(&row, token)).transpose()
    }

    async fn delete_exact(&self, token: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete refresh token: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::internal(format!("Failed to delete expired refresh tokens: {}", e))
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_for_subject(&self, subject_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS active
            FROM refresh_tokens
            WHERE user_id = ? AND expires_at > ?
        "#;

        let row = sqlx::query(query)
            .bind(subject_id.to_string())
            .bind(self.clock.now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count refresh tokens: {}", e)))?;

        let count: i64 = row.try_get("active").map_err(db_error("active"))?;
        Ok(count as usize)
    }
}
