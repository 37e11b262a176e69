//! Configuration for the token codec

use std::collections::HashMap;

use quill_shared::config::{AuthConfig, TokenKindConfig};

use crate::domain::entities::token::TokenKind;

/// Secrets, lifetimes and standard claims for every token kind
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Per-kind secret and lifetime; a missing entry or `None` secret disables the kind
    pub kinds: HashMap<TokenKind, TokenKindConfig>,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
}

impl TokenCodecConfig {
    pub fn kind(&self, kind: TokenKind) -> Option<&TokenKindConfig> {
        self.kinds.get(&kind)
    }

    /// Replace the settings for one kind
    pub fn with_kind(mut self, kind: TokenKind, settings: TokenKindConfig) -> Self {
        self.kinds.insert(kind, settings);
        self
    }
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for TokenCodecConfig {
    fn from(auth: &AuthConfig) -> Self {
        let tokens = &auth.tokens;
        let kinds = HashMap::from([
            (TokenKind::Access, tokens.access.clone()),
            (TokenKind::Refresh, tokens.refresh.clone()),
            (TokenKind::EmailVerify, tokens.email_verify.clone()),
            (TokenKind::ForgotPassword, tokens.forgot_password.clone()),
        ]);

        Self {
            kinds,
            issuer: auth.issuer.clone(),
            audience: auth.audience.clone(),
        }
    }
}
