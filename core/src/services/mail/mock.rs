//! Recording mailer for tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{MailSubject, Mailer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: MailSubject,
    pub token: String,
}

#[derive(Clone, Default)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn last_token(&self, subject: MailSubject) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.subject == subject)
            .map(|m| m.token.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: MailSubject, token: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("smtp unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject,
            token: token.to_string(),
        });
        Ok(())
    }
}
