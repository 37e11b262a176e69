//! Partial update applied to an account record.

use chrono::{DateTime, Utc};

use crate::domain::entities::account::{Account, VerifyStatus};
use crate::domain::entities::token::TokenKind;

/// Changes to apply in one repository write. `None` leaves a field untouched;
/// `Some(None)` on a token field clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub verify_status: Option<VerifyStatus>,
    pub password_hash: Option<String>,
    pub email_verify_token: Option<Option<String>>,
    pub forgot_password_token: Option<Option<String>>,
}

impl AccountUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_status(mut self, status: VerifyStatus) -> Self {
        self.verify_status = Some(status);
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Store `token` as the live action token for `kind`
    pub fn set_action_token(mut self, kind: TokenKind, token: impl Into<String>) -> Self {
        *self.action_slot(kind) = Some(Some(token.into()));
        self
    }

    pub fn clear_action_token(mut self, kind: TokenKind) -> Self {
        *self.action_slot(kind) = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the changes in place, stamping `updated_at`
    pub fn apply_to(&self, account: &mut Account, now: DateTime<Utc>) {
        if let Some(status) = self.verify_status {
            account.verify_status = status;
        }
        if let Some(hash) = &self.password_hash {
            account.password_hash = hash.clone();
        }
        if let Some(token) = &self.email_verify_token {
            account.email_verify_token = token.clone();
        }
        if let Some(token) = &self.forgot_password_token {
            account.forgot_password_token = token.clone();
        }
        account.updated_at = now;
    }

    fn action_slot(&mut self, kind: TokenKind) -> &mut Option<Option<String>> {
        match kind {
            TokenKind::ForgotPassword => &mut self.forgot_password_token,
            // Access and refresh tokens are never stored on the account.
            _ => &mut self.email_verify_token,
        }
    }
}
