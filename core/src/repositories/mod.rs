//! Repository interfaces consumed by the domain services.

pub mod account;
pub mod blog;
pub mod token;

pub use account::AccountRepository;
pub use blog::BlogRepository;
pub use token::TokenRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use blog::MockBlogRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
