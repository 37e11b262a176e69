//! Process-local repository implementations
//!
//! Used when `STORE_BACKEND=memory` and by the HTTP integration tests. Every
//! operation takes a single lock, so each trait method is atomic.

mod account_repository;
mod blog_repository;
mod token_repository;

pub use account_repository::InMemoryAccountRepository;
pub use blog_repository::InMemoryBlogRepository;
pub use token_repository::InMemoryTokenRepository;
