//! HS256 token codec with one secret and lifetime per token kind

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::account::VerifyStatus;
use crate::domain::entities::token::{TokenKind, TokenPayload};
use crate::errors::TokenError;

use super::config::TokenCodecConfig;

struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_seconds: i64,
}

/// A freshly signed token together with the payload it encodes
#[derive(Clone)]
pub struct SignedToken {
    pub token: String,
    pub payload: TokenPayload,
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedToken")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Signs and verifies tokens. Pure computation: never touches a store.
pub struct TokenCodec {
    keys: HashMap<TokenKind, KindKeys>,
    validation: Validation,
    issuer: String,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec. Kinds without a secret stay unusable and report
    /// `MissingSecret` when used.
    pub fn new(config: TokenCodecConfig, clock: Arc<dyn Clock>) -> Self {
        let keys = config
            .kinds
            .iter()
            .filter_map(|(kind, settings)| {
                let secret = settings.secret.as_deref()?;
                Some((
                    *kind,
                    KindKeys {
                        encoding: EncodingKey::from_secret(secret.as_bytes()),
                        decoding: DecodingKey::from_secret(secret.as_bytes()),
                        lifetime_seconds: settings.lifetime_seconds,
                    },
                ))
            })
            .collect();

        // Expiry is checked against the injected clock, not inside jsonwebtoken.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys,
            validation,
            issuer: config.issuer,
            audience: config.audience,
            clock,
        }
    }

    /// Configured lifetime for `kind` in seconds
    pub fn lifetime(&self, kind: TokenKind) -> Result<i64, TokenError> {
        self.keys_for(kind).map(|k| k.lifetime_seconds)
    }

    /// Signs a token with the full configured lifetime for `kind`
    pub fn sign(
        &self,
        subject_id: Uuid,
        verify: VerifyStatus,
        kind: TokenKind,
    ) -> Result<SignedToken, TokenError> {
        self.sign_with_expiry(subject_id, verify, kind, None)
    }

    /// Signs a token, pinning `exp` to `expires_at` (Unix seconds) when given
    /// instead of granting a fresh lifetime
    pub fn sign_with_expiry(
        &self,
        subject_id: Uuid,
        verify: VerifyStatus,
        kind: TokenKind,
        expires_at: Option<i64>,
    ) -> Result<SignedToken, TokenError> {
        let keys = self.keys_for(kind)?;
        let iat = self.clock.now().timestamp();
        let exp = expires_at.unwrap_or(iat + keys.lifetime_seconds);

        let payload = TokenPayload {
            sub: subject_id,
            token_kind: kind,
            verify,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &payload, &keys.encoding)
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok(SignedToken { token, payload })
    }

    /// Verifies signature, standard claims, kind and expiry
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::MissingSecret)` - No secret configured for `kind`
    /// * `Err(TokenError::Malformed)` - Bad signature, structure or issuer/audience
    /// * `Err(TokenError::KindMismatch)` - Signed for a different kind
    /// * `Err(TokenError::Expired)` - Current time is at or past `exp`
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenPayload, TokenError> {
        let keys = self.keys_for(kind)?;

        let payload = decode::<TokenPayload>(token, &keys.decoding, &self.validation)
            .map_err(|_| TokenError::Malformed)?
            .claims;

        if payload.token_kind != kind {
            return Err(TokenError::KindMismatch {
                expected: kind,
                found: payload.token_kind,
            });
        }

        if payload.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(payload)
    }

    fn keys_for(&self, kind: TokenKind) -> Result<&KindKeys, TokenError> {
        self.keys.get(&kind).ok_or(TokenError::MissingSecret { kind })
    }
}
