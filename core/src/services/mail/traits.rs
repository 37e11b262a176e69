//! Trait for outbound mail integration

use async_trait::async_trait;

/// What a mail is about; decides the subject line and the link it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSubject {
    VerifyEmail,
    ResetPassword,
}

impl MailSubject {
    pub fn title(&self) -> &'static str {
        match self {
            MailSubject::VerifyEmail => "Verify your email",
            MailSubject::ResetPassword => "Reset your password",
        }
    }

    /// Client page that accepts the token
    pub fn link_path(&self) -> &'static str {
        match self {
            MailSubject::VerifyEmail => "verify-email",
            MailSubject::ResetPassword => "reset-password",
        }
    }
}

/// Trait for mail delivery integration.
///
/// Delivery is fire-and-forget from the caller's side: errors are reported
/// back but never retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: MailSubject, token: &str) -> Result<(), String>;
}
