//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod blog;
pub mod mail;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{ActionTokenService, ValidatedAction};
pub use auth::{AuthService, AuthServiceConfig};
pub use blog::{Actor, BlogService, NewBlog};
pub use mail::{MailSubject, Mailer};
pub use session::SessionManager;
pub use token::{
    CleanupResult, SignedToken, TokenCleanupConfig, TokenCleanupService, TokenCodec,
    TokenCodecConfig,
};
