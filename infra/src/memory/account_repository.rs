//! In-memory account repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::entities::account::Account;
use quill_core::domain::entities::token::TokenKind;
use quill_core::domain::value_objects::AccountUpdate;
use quill_core::errors::{AuthError, DomainError};
use quill_core::repositories::AccountRepository;

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AuthError::EmailAlreadyExists.into());
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(&id).map_or(0, |account| {
            update.apply_to(account, Utc::now());
            1
        }))
    }

    async fn update_fields_if_action_token(
        &self,
        id: Uuid,
        kind: TokenKind,
        expected_token: &str,
        update: AccountUpdate,
    ) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) if account.action_token(kind) == Some(expected_token) => {
                update.apply_to(account, Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
