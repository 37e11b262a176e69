//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::TokenKind;
use crate::domain::value_objects::AccountUpdate;
use crate::errors::{AuthError, DomainError};

use super::r#trait::AccountRepository;

/// Mock account repository for testing
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read, bypassing the trait
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
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
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                update.apply_to(account, Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
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
