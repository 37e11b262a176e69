//! Authentication service module
//!
//! This module provides the account-facing flows:
//! - Registration and email/password sign-in
//! - Session refresh and logout
//! - Email verification and password reset via one-shot tokens

mod config;
mod password;
mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
