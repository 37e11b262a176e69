//! Session manager: issues, rotates, revokes and validates credential pairs.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::account::VerifyStatus;
use crate::domain::entities::token::{IssuedRefreshRecord, TokenKind, TokenPair, TokenPayload};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::token::TokenCodec;

/// Orchestrates the token codec and the refresh-record store.
///
/// Every refresh token handed out has a live record in the store until it is
/// rotated, revoked or expires. Access tokens are never stored.
pub struct SessionManager<R: TokenRepository> {
    codec: Arc<TokenCodec>,
    repository: Arc<R>,
}

impl<R: TokenRepository> SessionManager<R> {
    pub fn new(codec: Arc<TokenCodec>, repository: Arc<R>) -> Self {
        Self { codec, repository }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Access token lifetime in seconds, reported to clients as `expires_in`
    pub fn access_lifetime(&self) -> DomainResult<i64> {
        Ok(self.codec.lifetime(TokenKind::Access)?)
    }

    /// Sign a fresh access/refresh pair and record the refresh token
    ///
    /// Nothing is returned unless the refresh record was persisted.
    pub async fn issue_pair(
        &self,
        subject_id: Uuid,
        verify: VerifyStatus,
    ) -> DomainResult<TokenPair> {
        let access = self.codec.sign(subject_id, verify, TokenKind::Access)?;
        let refresh = self.codec.sign(subject_id, verify, TokenKind::Refresh)?;

        self.repository
            .insert(IssuedRefreshRecord::from_payload(&refresh.token, &refresh.payload))
            .await?;

        debug!(user_id = %subject_id, "Issued token pair");
        Ok(TokenPair::new(access.token, refresh.token))
    }

    /// Exchange a live refresh token for a new pair
    ///
    /// The new refresh token keeps `carried_expiry` (Unix seconds) when given,
    /// so rotation never extends a session past its original end. The old
    /// record is deleted and the new one inserted concurrently. The two are
    /// not atomic: if the delete succeeds and the insert fails, the old
    /// session is gone and no new pair is returned, so the caller must sign
    /// in again.
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` - `old_refresh` fails verification, has no live
    ///   record, or was issued to another subject
    pub async fn rotate(
        &self,
        old_refresh: &str,
        subject_id: Uuid,
        verify: VerifyStatus,
        carried_expiry: Option<i64>,
    ) -> DomainResult<TokenPair> {
        let presented = self.validate_refresh_presented(old_refresh).await?;
        if presented.sub != subject_id {
            warn!(user_id = %subject_id, "Refresh token presented for another subject");
            return Err(DomainError::unauthenticated(TokenError::Malformed));
        }

        let access = self.codec.sign(subject_id, verify, TokenKind::Access)?;
        let refresh = self.codec.sign_with_expiry(
            subject_id,
            verify,
            TokenKind::Refresh,
            carried_expiry,
        )?;
        let record = IssuedRefreshRecord::from_payload(&refresh.token, &refresh.payload);

        let (deleted, inserted) = tokio::join!(
            self.repository.delete_exact(old_refresh),
            self.repository.insert(record)
        );
        inserted?;
        if deleted? == 0 {
            // Another rotation or a logout removed it after validation.
            warn!(user_id = %subject_id, "Rotated refresh token was already removed");
        }

        info!(user_id = %subject_id, "Rotated refresh token");
        Ok(TokenPair::new(access.token, refresh.token))
    }

    /// Remove a refresh record. Idempotent: unknown tokens are not an error.
    pub async fn revoke(&self, refresh_token: &str) -> DomainResult<()> {
        let removed = self.repository.delete_exact(refresh_token).await?;
        debug!(removed, "Revoked refresh token");
        Ok(())
    }

    /// Check a bearer access token. Performs no store lookup.
    pub fn validate_bearer(&self, access_token: &str) -> DomainResult<TokenPayload> {
        self.codec
            .verify(access_token, TokenKind::Access)
            .map_err(into_auth_failure)
    }

    /// Check the signature and claims of a refresh token without consulting the store
    pub fn verify_refresh_signature(&self, refresh_token: &str) -> DomainResult<TokenPayload> {
        self.codec
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(into_auth_failure)
    }

    /// Check a refresh token and require a live record for it
    pub async fn validate_refresh_presented(
        &self,
        refresh_token: &str,
    ) -> DomainResult<TokenPayload> {
        let payload = self.verify_refresh_signature(refresh_token)?;

        match self.repository.find_exact(refresh_token).await? {
            Some(_) => Ok(payload),
            None => Err(DomainError::unauthenticated(TokenError::NotInStore)),
        }
    }

    /// Live sessions for a subject
    pub async fn active_sessions(&self, subject_id: Uuid) -> DomainResult<usize> {
        self.repository.count_for_subject(subject_id).await
    }
}

/// Caller mistakes become `Unauthenticated`; misconfiguration stays as is
fn into_auth_failure(error: TokenError) -> DomainError {
    if error.is_fatal() {
        DomainError::Token(error)
    } else {
        DomainError::unauthenticated(error)
    }
}
