//! Mailer that keeps every message in memory

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use quill_core::services::mail::{MailSubject, Mailer};
use quill_shared::config::MailConfig;

/// A rendered message held by the outbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: MailSubject,
    pub link: String,
    pub token: String,
}

/// Collects messages instead of sending them. Clones share one outbox.
#[derive(Clone)]
pub struct OutboxMailer {
    config: MailConfig,
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

impl OutboxMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn messages(&self) -> Vec<OutgoingMail> {
        self.sent.lock().await.clone()
    }

    /// Token from the most recent message to `to` about `subject`
    pub async fn latest_token(&self, to: &str, subject: MailSubject) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to && m.subject == subject)
            .map(|m| m.token.clone())
    }
}

impl Default for OutboxMailer {
    fn default() -> Self {
        Self::new(MailConfig::default())
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, to: &str, subject: MailSubject, token: &str) -> Result<(), String> {
        let mail = OutgoingMail {
            from: self.config.from_address.clone(),
            to: to.to_string(),
            subject,
            link: self.config.link_for(subject.link_path(), token),
            token: token.to_string(),
        };
        self.sent.lock().await.push(mail);
        tracing::debug!(to = %to, subject = subject.title(), "Mail queued in outbox");
        Ok(())
    }
}
