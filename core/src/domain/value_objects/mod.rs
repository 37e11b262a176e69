//! Value objects representing immutable domain concepts.

pub mod account_update;
pub mod auth_response;
pub mod blog_query;

pub use account_update::AccountUpdate;
pub use auth_response::AuthResponse;
pub use blog_query::{BlogQuery, BlogUpdate};
