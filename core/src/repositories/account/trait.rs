//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::TokenKind;
use crate::domain::value_objects::AccountUpdate;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Writes go through partial updates so that a caller never overwrites
/// fields it did not mean to touch.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyExists))` - Email is taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Emails are compared case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Apply `update` to the account with `id`
    ///
    /// # Returns
    /// * `Ok(matched)` - `1` if the account exists, `0` otherwise
    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<u64, DomainError>;

    /// Apply `update` only if the account's live `kind` token equals `expected_token`.
    ///
    /// The comparison and the write happen as one atomic step, so two callers
    /// racing with the same token cannot both match.
    ///
    /// # Returns
    /// * `Ok(1)` - Token matched and the update was applied
    /// * `Ok(0)` - No such account, or its stored token differs
    async fn update_fields_if_action_token(
        &self,
        id: Uuid,
        kind: TokenKind,
        expected_token: &str,
        update: AccountUpdate,
    ) -> Result<u64, DomainError>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
