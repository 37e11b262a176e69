//! Type definitions shared by the API and the domain layer
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - API response wrappers and health checks

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{ApiResponse, HealthResponse, HealthStatus};
