//! Authentication configuration: per-kind token secrets and lifetimes

use serde::{Deserialize, Serialize};

/// Signing settings for a single token kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenKindConfig {
    /// HMAC secret; `None` leaves the kind unusable until configured
    #[serde(default)]
    pub secret: Option<String>,

    /// Lifetime of a freshly signed token in seconds
    pub lifetime_seconds: i64,
}

impl TokenKindConfig {
    pub fn new(secret: impl Into<String>, lifetime_seconds: i64) -> Self {
        Self {
            secret: Some(secret.into()),
            lifetime_seconds,
        }
    }

    /// Read `<PREFIX>_SECRET` and `<PREFIX>_EXPIRES_IN`.
    ///
    /// An empty secret counts as unset. The lifetime accepts plain seconds
    /// or a suffixed duration such as `15m` or `7d`.
    pub fn from_env(prefix: &str, default_lifetime: i64) -> Self {
        let secret = std::env::var(format!("{}_SECRET", prefix))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let lifetime_seconds = std::env::var(format!("{}_EXPIRES_IN", prefix))
            .ok()
            .and_then(|raw| parse_lifetime(&raw))
            .unwrap_or(default_lifetime);

        Self {
            secret,
            lifetime_seconds,
        }
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }
}

/// Secrets and lifetimes for each of the four token kinds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenSettings {
    pub access: TokenKindConfig,
    pub refresh: TokenKindConfig,
    pub email_verify: TokenKindConfig,
    pub forgot_password: TokenKindConfig,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access: TokenKindConfig::new("dev-access-secret-change-me", 900), // 15 minutes
            refresh: TokenKindConfig::new("dev-refresh-secret-change-me", 8_640_000), // 100 days
            email_verify: TokenKindConfig::new("dev-email-verify-secret-change-me", 604_800), // 7 days
            forgot_password: TokenKindConfig::new("dev-forgot-password-secret-change-me", 604_800),
        }
    }
}

impl TokenSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access: TokenKindConfig::from_env("ACCESS_TOKEN", defaults.access.lifetime_seconds),
            refresh: TokenKindConfig::from_env("REFRESH_TOKEN", defaults.refresh.lifetime_seconds),
            email_verify: TokenKindConfig::from_env(
                "EMAIL_VERIFY_TOKEN",
                defaults.email_verify.lifetime_seconds,
            ),
            forgot_password: TokenKindConfig::from_env(
                "FORGOT_PASSWORD_TOKEN",
                defaults.forgot_password.lifetime_seconds,
            ),
        }
    }

    /// Names of the kinds that have no secret configured
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        [
            ("access", &self.access),
            ("refresh", &self.refresh),
            ("email_verify", &self.email_verify),
            ("forgot_password", &self.forgot_password),
        ]
        .into_iter()
        .filter(|(_, kind)| !kind.has_secret())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Per-kind token settings
    pub tokens: TokenSettings,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Interval between expired refresh-record sweeps
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tokens: TokenSettings::default(),
            issuer: default_issuer(),
            audience: default_audience(),
            bcrypt_cost: default_bcrypt_cost(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| default_audience());
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);
        let cleanup_interval_seconds = std::env::var("TOKEN_CLEANUP_INTERVAL")
            .ok()
            .and_then(|v| parse_lifetime(&v))
            .map(|secs| secs as u64)
            .unwrap_or_else(default_cleanup_interval);

        Self {
            tokens: TokenSettings::from_env(),
            issuer,
            audience,
            bcrypt_cost,
            cleanup_interval_seconds,
        }
    }
}

/// Parse a lifetime such as `900`, `30s`, `15m`, `12h` or `7d` into seconds.
///
/// Returns `None` for empty, negative or unrecognised input.
pub fn parse_lifetime(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 3_600),
        'd' => (&raw[..raw.len() - 1], 86_400),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value: i64 = digits.trim().parse().ok()?;
    if value < 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

fn default_issuer() -> String {
    String::from("quill")
}

fn default_audience() -> String {
    String::from("quill-api")
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_cleanup_interval() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lifetime_units() {
        assert_eq!(parse_lifetime("900"), Some(900));
        assert_eq!(parse_lifetime("30s"), Some(30));
        assert_eq!(parse_lifetime("15m"), Some(900));
        assert_eq!(parse_lifetime("12h"), Some(43_200));
        assert_eq!(parse_lifetime("7d"), Some(604_800));
    }

    #[test]
    fn test_parse_lifetime_rejects_garbage() {
        assert_eq!(parse_lifetime(""), None);
        assert_eq!(parse_lifetime("abc"), None);
        assert_eq!(parse_lifetime("10w"), None);
        assert_eq!(parse_lifetime("-5m"), None);
    }

    #[test]
    fn test_default_settings_have_every_secret() {
        let settings = TokenSettings::default();
        assert!(settings.missing_secrets().is_empty());
        assert_eq!(settings.access.lifetime_seconds, 900);
    }

    #[test]
    fn test_missing_secrets_lists_unset_kinds() {
        let mut settings = TokenSettings::default();
        settings.email_verify.secret = None;
        assert_eq!(settings.missing_secrets(), vec!["email_verify"]);
    }
}
