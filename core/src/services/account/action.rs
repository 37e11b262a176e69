//! One-shot action tokens stored on the account record.
//!
//! Each action kind moves through `absent -> active -> consumed`. Only the
//! most recently issued token of a kind is accepted; consuming it clears the
//! field in the same write that applies its effect.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, VerifyStatus};
use crate::domain::entities::token::{TokenKind, TokenPair, TokenPayload};
use crate::domain::value_objects::AccountUpdate;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::session::SessionManager;

/// An action token that matched the account's live value
#[derive(Debug, Clone)]
pub struct ValidatedAction {
    pub account: Account,
    pub payload: TokenPayload,
}

impl ValidatedAction {
    pub fn subject_id(&self) -> Uuid {
        self.account.id
    }
}

/// Issues, validates and consumes email-verify and forgot-password tokens
pub struct ActionTokenService<A: AccountRepository, R: TokenRepository> {
    accounts: Arc<A>,
    sessions: Arc<SessionManager<R>>,
}

impl<A: AccountRepository, R: TokenRepository> ActionTokenService<A, R> {
    pub fn new(accounts: Arc<A>, sessions: Arc<SessionManager<R>>) -> Self {
        Self { accounts, sessions }
    }

    /// Sign a new action token and make it the only live one for its kind
    ///
    /// Any earlier token of the same kind stops validating. Returns the token
    /// string for delivery by the mailer.
    pub async fn issue_action(
        &self,
        kind: TokenKind,
        subject_id: Uuid,
        verify: VerifyStatus,
    ) -> DomainResult<String> {
        ensure_action_kind(kind)?;
        let signed = self.sessions.codec().sign(subject_id, verify, kind)?;

        let matched = self
            .accounts
            .update_fields(
                subject_id,
                AccountUpdate::new().set_action_token(kind, signed.token.clone()),
            )
            .await?;
        if matched == 0 {
            return Err(AuthError::AccountNotFound.into());
        }

        info!(user_id = %subject_id, kind = %kind, "Issued action token");
        Ok(signed.token)
    }

    /// Decode an action token and check it against the account's live value
    ///
    /// # Errors
    ///
    /// * `Token(Malformed | KindMismatch | Expired)` - Codec rejected the token
    /// * `AccountNotFound` - Subject no longer exists
    /// * `ActionTokenMismatch` - The live token of this kind is not `token`,
    ///   either because a newer one superseded it or because it was consumed
    pub async fn validate_action(
        &self,
        kind: TokenKind,
        token: &str,
    ) -> DomainResult<ValidatedAction> {
        ensure_action_kind(kind)?;
        let payload = self.sessions.codec().verify(token, kind)?;

        let account = self
            .accounts
            .find_by_id(payload.sub)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        match account.action_token(kind) {
            Some(live) if live == token => Ok(ValidatedAction { account, payload }),
            live => {
                debug!(
                    user_id = %account.id,
                    kind = %kind,
                    consumed = live.is_none(),
                    "Stale action token presented"
                );
                Err(AuthError::ActionTokenMismatch.into())
            }
        }
    }

    /// Mark the account verified, clear its email-verify token and sign it in
    ///
    /// The status change and the clear are one conditional write keyed on
    /// `token`; a concurrent consumer that lost the race gets an error.
    pub async fn consume_email_verify(
        &self,
        subject_id: Uuid,
        token: &str,
    ) -> DomainResult<TokenPair> {
        let update = AccountUpdate::new()
            .verify_status(VerifyStatus::Verified)
            .clear_action_token(TokenKind::EmailVerify);
        self.consume(subject_id, TokenKind::EmailVerify, token, update)
            .await?;

        info!(user_id = %subject_id, "Email verified");
        self.sessions
            .issue_pair(subject_id, VerifyStatus::Verified)
            .await
    }

    /// Replace the password hash and clear the forgot-password token in one write
    pub async fn consume_forgot_password(
        &self,
        subject_id: Uuid,
        token: &str,
        new_password_hash: String,
    ) -> DomainResult<()> {
        let update = AccountUpdate::new()
            .password_hash(new_password_hash)
            .clear_action_token(TokenKind::ForgotPassword);
        self.consume(subject_id, TokenKind::ForgotPassword, token, update)
            .await?;

        info!(user_id = %subject_id, "Password reset");
        Ok(())
    }

    async fn consume(
        &self,
        subject_id: Uuid,
        kind: TokenKind,
        token: &str,
        update: AccountUpdate,
    ) -> DomainResult<()> {
        let matched = self
            .accounts
            .update_fields_if_action_token(subject_id, kind, token, update)
            .await?;
        if matched == 1 {
            return Ok(());
        }

        warn!(user_id = %subject_id, kind = %kind, "Action token changed before it could be consumed");
        // A 0-row write means the account is gone or its live token is no
        // longer `token`; consumed and superseded both count as a mismatch
        if self.accounts.find_by_id(subject_id).await?.is_none() {
            return Err(AuthError::AccountNotFound.into());
        }
        Err(AuthError::ActionTokenMismatch.into())
    }
}

fn ensure_action_kind(kind: TokenKind) -> DomainResult<()> {
    if kind.is_action() {
        Ok(())
    } else {
        Err(DomainError::internal(format!("{} is not an action token kind", kind)))
    }
}
