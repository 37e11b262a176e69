//! Token codec and refresh-record maintenance
//!
//! - HS256 signing and verification with a secret and lifetime per token kind
//! - Background cleanup of expired refresh records

mod cleanup;
mod codec;
mod config;


pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use codec::{SignedToken, TokenCodec};
pub use config::TokenCodecConfig;
