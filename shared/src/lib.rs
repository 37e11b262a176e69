//! Shared configuration and wire types for the Quill server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures and error codes
//! - Response wrappers and pagination

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, MailConfig,
    ServerConfig, StoreBackend, TokenKindConfig, TokenSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, PaginatedResponse, Pagination};
