//! Mailer implementations
//!
//! Neither implementation talks to an SMTP server; delivery to a real
//! provider plugs in behind the same `Mailer` trait.

mod log_mailer;
mod outbox;

pub use log_mailer::LogMailer;
pub use outbox::{OutboxMailer, OutgoingMail};
