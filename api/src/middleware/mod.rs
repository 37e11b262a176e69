//! Middleware components for the API
//!
//! - `auth` - Bearer token validation and the `AuthContext` extractor
//! - `cors` - Cross-origin configuration

pub mod auth;
pub mod cors;

pub use auth::{AccessTokenVerifier, AuthContext, JwtAuth};
pub use cors::create_cors;
