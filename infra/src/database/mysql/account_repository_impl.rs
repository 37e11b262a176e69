//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use quill_core::domain::entities::account::{Account, VerifyStatus};
use quill_core::domain::entities::token::TokenKind;
use quill_core::domain::value_objects::AccountUpdate;
use quill_core::errors::{AuthError, DomainError};
use quill_core::repositories::AccountRepository;

use super::{db_error, is_unique_violation};

const ACCOUNT_COLUMNS: &str = "id, email, username, password_hash, verify_status, \
     email_verify_token, forgot_password_token, created_at, updated_at";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(db_error("id"))?;
        let verify_status: String = row.try_get("verify_status").map_err(db_error("verify_status"))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid account UUID: {}", e)))?,
            email: row.try_get("email").map_err(db_error("email"))?,
            username: row.try_get("username").map_err(db_error("username"))?,
            password_hash: row.try_get("password_hash").map_err(db_error("password_hash"))?,
            verify_status: verify_status
                .parse::<VerifyStatus>()
                .map_err(DomainError::internal)?,
            email_verify_token: row
                .try_get("email_verify_token")
                .map_err(db_error("email_verify_token"))?,
            forgot_password_token: row
                .try_get("forgot_password_token")
                .map_err(db_error("forgot_password_token"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(db_error("updated_at"))?,
        })
    }

    /// Column holding the live token for an action kind
    fn action_column(kind: TokenKind) -> Option<&'static str> {
        match kind {
            TokenKind::EmailVerify => Some("email_verify_token"),
            TokenKind::ForgotPassword => Some("forgot_password_token"),
            TokenKind::Access | TokenKind::Refresh => None,
        }
    }

    /// `UPDATE accounts SET ...` for every field present in `update`.
    ///
    /// `updated_at` is always written, which also keeps MySQL's affected-row
    /// count equal to the matched-row count.
    fn update_statement(id: Uuid, update: &AccountUpdate) -> QueryBuilder<'static, MySql> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE accounts SET ");
        {
            let mut set = builder.separated(", ");
            set.push("updated_at = ").push_bind_unseparated(Utc::now());
            if let Some(status) = update.verify_status {
                set.push("verify_status = ")
                    .push_bind_unseparated(status.as_str());
            }
            if let Some(hash) = &update.password_hash {
                set.push("password_hash = ")
                    .push_bind_unseparated(hash.clone());
            }
            if let Some(token) = &update.email_verify_token {
                set.push("email_verify_token = ")
                    .push_bind_unseparated(token.clone());
            }
            if let Some(token) = &update.forgot_password_token {
                set.push("forgot_password_token = ")
                    .push_bind_unseparated(token.clone());
            }
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());
        builder
    }

    async fn find_one(&self, clause: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE {} LIMIT 1", ACCOUNT_COLUMNS, clause);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find account: {}", e)))?;

        result.map(|row| Self::row_to_account(&row)).transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = format!(
            "INSERT INTO accounts ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            ACCOUNT_COLUMNS
        );

        sqlx::query(&query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(account.verify_status.as_str())
            .bind(&account.email_verify_token)
            .bind(&account.forgot_password_token)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyExists)
                } else {
                    DomainError::internal(format!("Failed to create account: {}", e))
                }
            })?;

        tracing::debug!(user_id = %account.id, "Account row inserted");
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id = ?", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("LOWER(email) = ?", email.to_lowercase()).await
    }

    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<u64, DomainError> {
        let result = Self::update_statement(id, &update)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update account: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn update_fields_if_action_token(
        &self,
        id: Uuid,
        kind: TokenKind,
        expected_token: &str,
        update: AccountUpdate,
    ) -> Result<u64, DomainError> {
        let Some(column) = Self::action_column(kind) else {
            return Ok(0);
        };

        let mut builder = Self::update_statement(id, &update);
        builder
            .push(format!(" AND {} = ", column))
            .push_bind(expected_token.to_string());

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to consume {} token: {}", kind, e)))?;

        Ok(result.rows_affected())
    }
}
