//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, VerifyStatus};
use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::account::ActionTokenService;
use crate::services::mail::{MailSubject, Mailer};
use crate::services::session::SessionManager;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};
use super::validation::{normalize_email, validate_new_password};

/// Authentication service for the complete account flow: registration,
/// sign-in, session refresh, email verification and password reset
pub struct AuthService<A, R, M>
where
    A: AccountRepository,
    R: TokenRepository,
    M: Mailer,
{
    /// Account persistence
    accounts: Arc<A>,
    /// Access/refresh pair lifecycle
    sessions: Arc<SessionManager<R>>,
    /// Email-verify and forgot-password tokens
    actions: ActionTokenService<A, R>,
    /// Delivers action tokens to the account owner
    mailer: Arc<M>,
    config: AuthServiceConfig,
}

impl<A, R, M> AuthService<A, R, M>
where
    A: AccountRepository,
    R: TokenRepository,
    M: Mailer,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository for account persistence
    /// * `sessions` - Session manager shared with the bearer middleware
    /// * `mailer` - Outbound mail for action tokens
    /// * `config` - Service configuration
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<SessionManager<R>>,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            actions: ActionTokenService::new(accounts.clone(), sessions.clone()),
            accounts,
            sessions,
            mailer,
            config,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionManager<R>> {
        &self.sessions
    }

    /// Register a new account and sign it in
    ///
    /// This method:
    /// 1. Validates the email and password rules
    /// 2. Rejects an email that is already registered
    /// 3. Stores the account as unverified with a fresh email-verify token
    /// 4. Issues an access/refresh pair
    /// 5. Mails the verification link; a delivery failure is only logged
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<AuthResponse> {
        let email = normalize_email(email)?;
        validate_new_password(password, confirm_password)?;

        if self.accounts.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let account = self
            .accounts
            .create(Account::new(Uuid::new_v4(), email, password_hash))
            .await?;

        let verify_token = self
            .actions
            .issue_action(TokenKind::EmailVerify, account.id, VerifyStatus::Unverified)
            .await?;
        let pair = self
            .sessions
            .issue_pair(account.id, VerifyStatus::Unverified)
            .await?;

        self.deliver(&account, MailSubject::VerifyEmail, &verify_token)
            .await;

        info!(user_id = %account.id, "Account registered");
        self.respond(pair, VerifyStatus::Unverified)
    }

    /// Sign in with email and password
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    /// Banned and unverified accounts are refused before any token is issued.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = email.trim().to_lowercase();
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            warn!(user_id = %account.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        match account.verify_status {
            VerifyStatus::Banned => return Err(AuthError::AccountBanned.into()),
            VerifyStatus::Unverified => return Err(AuthError::EmailNotVerified.into()),
            VerifyStatus::Verified => {}
        }

        let pair = self
            .sessions
            .issue_pair(account.id, account.verify_status)
            .await?;

        info!(user_id = %account.id, "User logged in");
        self.respond(pair, account.verify_status)
    }

    /// Exchange a live refresh token for a new pair
    ///
    /// The new refresh token keeps the presented token's expiry, and the
    /// verification status is re-read from the account.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let presented = self.sessions.validate_refresh_presented(refresh_token).await?;

        let account = self
            .accounts
            .find_by_id(presented.sub)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        if account.is_banned() {
            return Err(AuthError::AccountBanned.into());
        }

        let pair = self
            .sessions
            .rotate(
                refresh_token,
                account.id,
                account.verify_status,
                Some(presented.exp),
            )
            .await?;

        self.respond(pair, account.verify_status)
    }

    /// Sign out one device. Succeeds even if the session is already gone,
    /// but the token must be a genuine refresh token.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let payload = self.sessions.verify_refresh_signature(refresh_token)?;
        self.sessions.revoke(refresh_token).await?;

        info!(user_id = %payload.sub, "User logged out");
        Ok(())
    }

    /// Consume an email-verify token and sign the account in as verified
    pub async fn verify_email(&self, token: &str) -> DomainResult<AuthResponse> {
        let validated = self
            .actions
            .validate_action(TokenKind::EmailVerify, token)
            .await?;
        let pair = self
            .actions
            .consume_email_verify(validated.subject_id(), token)
            .await?;

        self.respond(pair, VerifyStatus::Verified)
    }

    /// Issue a new email-verify token, superseding any earlier one
    pub async fn resend_verify_email(&self, subject_id: Uuid) -> DomainResult<()> {
        let account = self.load(subject_id).await?;
        match account.verify_status {
            VerifyStatus::Verified => return Err(AuthError::ActionAlreadyConsumed.into()),
            VerifyStatus::Banned => return Err(AuthError::AccountBanned.into()),
            VerifyStatus::Unverified => {}
        }

        let token = self
            .actions
            .issue_action(TokenKind::EmailVerify, account.id, account.verify_status)
            .await?;
        self.deliver(&account, MailSubject::VerifyEmail, &token).await;
        Ok(())
    }

    /// Issue a forgot-password token and mail it
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = email.trim().to_lowercase();
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let token = self
            .actions
            .issue_action(TokenKind::ForgotPassword, account.id, account.verify_status)
            .await?;
        self.deliver(&account, MailSubject::ResetPassword, &token).await;
        Ok(())
    }

    /// Check a forgot-password token without consuming it
    pub async fn verify_forgot_password(&self, token: &str) -> DomainResult<()> {
        self.actions
            .validate_action(TokenKind::ForgotPassword, token)
            .await
            .map(|_| ())
    }

    /// Set a new password with a forgot-password token
    ///
    /// Existing sessions stay signed in.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<()> {
        validate_new_password(password, confirm_password)?;
        let validated = self
            .actions
            .validate_action(TokenKind::ForgotPassword, token)
            .await?;

        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        self.actions
            .consume_forgot_password(validated.subject_id(), token, password_hash)
            .await
    }

    /// Profile of the signed-in account
    pub async fn me(&self, subject_id: Uuid) -> DomainResult<Account> {
        self.load(subject_id).await
    }

    async fn load(&self, subject_id: Uuid) -> DomainResult<Account> {
        Ok(self
            .accounts
            .find_by_id(subject_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?)
    }

    async fn deliver(&self, account: &Account, subject: MailSubject, token: &str) {
        if let Err(e) = self.mailer.send(&account.email, subject, token).await {
            warn!(user_id = %account.id, subject = subject.title(), "Mail delivery failed: {}", e);
        }
    }

    fn respond(&self, pair: TokenPair, verify_status: VerifyStatus) -> DomainResult<AuthResponse> {
        Ok(AuthResponse::from_token_pair(
            pair,
            self.sessions.access_lifetime()?,
            verify_status,
        ))
    }
}
