//! Request failure handling shared by routes and middleware

pub mod error;

pub use error::{handle_domain_error, ApiError};
