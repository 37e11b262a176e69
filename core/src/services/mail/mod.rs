//! Outbound mail abstraction

mod traits;

pub use traits::{MailSubject, Mailer};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockMailer;
