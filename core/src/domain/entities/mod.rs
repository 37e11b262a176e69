//! Domain entities representing core business objects.

pub mod account;
pub mod blog;
pub mod token;

pub use account::{Account, VerifyStatus};
pub use blog::{Blog, BlogStatus};
pub use token::{IssuedRefreshRecord, TokenKind, TokenPair, TokenPayload};
