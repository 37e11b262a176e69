//! Mailer that only records that a message would have been sent

use async_trait::async_trait;

use quill_core::services::mail::{MailSubject, Mailer};
use quill_shared::config::MailConfig;

/// Logs recipient and subject. The link, which embeds the token, is built
/// but never written out.
pub struct LogMailer {
    config: MailConfig,
}

impl LogMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: MailSubject, token: &str) -> Result<(), String> {
        let link = self.config.link_for(subject.link_path(), token);
        tracing::info!(
            from = %self.config.from_address,
            to = %to,
            subject = subject.title(),
            link_length = link.len(),
            "Mail dispatched"
        );
        Ok(())
    }
}
