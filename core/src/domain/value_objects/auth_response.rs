//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::account::VerifyStatus;
use crate::domain::entities::token::TokenPair;

/// Tokens handed out after register, login, refresh or email verification
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// Verification status baked into the access token
    pub verify_status: VerifyStatus,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair
    pub fn from_token_pair(pair: TokenPair, expires_in: i64, verify_status: VerifyStatus) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in,
            verify_status,
        }
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("expires_in", &self.expires_in)
            .field("verify_status", &self.verify_status)
            .finish_non_exhaustive()
    }
}
