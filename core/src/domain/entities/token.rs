//! Token entities for JWT-based authentication.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::account::VerifyStatus;

/// Purpose a token was minted for. Each kind has its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
    EmailVerify,
    ForgotPassword,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Access,
        TokenKind::Refresh,
        TokenKind::EmailVerify,
        TokenKind::ForgotPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::EmailVerify => "email_verify",
            TokenKind::ForgotPassword => "forgot_password",
        }
    }

    /// One-shot kinds whose live value is stored on the account record
    pub fn is_action(&self) -> bool {
        matches!(self, TokenKind::EmailVerify | TokenKind::ForgotPassword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by every signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject (account ID)
    pub sub: Uuid,

    /// What the token may be used for
    pub token_kind: TokenKind,

    /// Verification status of the account at signing time
    pub verify: VerifyStatus,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,

    /// Unique token ID, makes every signed string distinct
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl TokenPayload {
    pub fn subject_id(&self) -> Uuid {
        self.sub
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Record of an outstanding refresh credential.
///
/// A refresh token is usable iff a record with its exact string exists and is unexpired.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedRefreshRecord {
    pub subject_id: Uuid,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedRefreshRecord {
    /// Build the record for a freshly signed refresh token from its decoded payload
    pub fn from_payload(token: impl Into<String>, payload: &TokenPayload) -> Self {
        Self {
            subject_id: payload.sub,
            token: token.into(),
            issued_at: payload.issued_at(),
            expires_at: payload.expires_at(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// Token strings are credentials; keep them out of debug output.
impl fmt::Debug for IssuedRefreshRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedRefreshRecord")
            .field("subject_id", &self.subject_id)
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Access and refresh token handed to a client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
