//! Outbound mail configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sender address shown to recipients
    pub from_address: String,

    /// Front-end base URL that hosts the verify and reset pages
    pub client_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: String::from("no-reply@quill.local"),
            client_url: String::from("http://localhost:3000"),
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            client_url: std::env::var("CLIENT_URL").unwrap_or(defaults.client_url),
        }
    }

    /// Link a recipient follows to hand `token` back to the API
    pub fn link_for(&self, path: &str, token: &str) -> String {
        format!(
            "{}/{}?token={}",
            self.client_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
            token
        )
    }
}
