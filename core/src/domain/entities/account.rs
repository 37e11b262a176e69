//! Account entity: credentials, verification status and one-shot action tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::token::TokenKind;

/// Verification state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Unverified,
    Verified,
    Banned,
}

impl VerifyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyStatus::Unverified => "unverified",
            VerifyStatus::Verified => "verified",
            VerifyStatus::Banned => "banned",
        }
    }
}

impl Default for VerifyStatus {
    fn default() -> Self {
        VerifyStatus::Unverified
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerifyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unverified" => Ok(VerifyStatus::Unverified),
            "verified" => Ok(VerifyStatus::Verified),
            "banned" => Ok(VerifyStatus::Banned),
            other => Err(format!("Unknown verify status: {}", other)),
        }
    }
}

/// A registered account.
///
/// Each action token field is either `None` (never issued or consumed) or the
/// single currently valid token of that kind.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub verify_status: VerifyStatus,
    #[serde(skip_serializing)]
    pub email_verify_token: Option<String>,
    #[serde(skip_serializing)]
    pub forgot_password_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New unverified account with a generated username
    pub fn new(id: Uuid, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            username: format!("user{}", id.simple()),
            password_hash: password_hash.into(),
            verify_status: VerifyStatus::Unverified,
            email_verify_token: None,
            forgot_password_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored live token for an action kind; `None` for non-action kinds
    pub fn action_token(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::EmailVerify => self.email_verify_token.as_deref(),
            TokenKind::ForgotPassword => self.forgot_password_token.as_deref(),
            TokenKind::Access | TokenKind::Refresh => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verify_status == VerifyStatus::Verified
    }

    pub fn is_banned(&self) -> bool {
        self.verify_status == VerifyStatus::Banned
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("verify_status", &self.verify_status)
            .field("has_email_verify_token", &self.email_verify_token.is_some())
            .field("has_forgot_password_token", &self.forgot_password_token.is_some())
            .finish()
    }
}
