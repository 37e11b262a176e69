//! Route handlers grouped by resource
//!
//! - `health` - Liveness check
//! - `users` - Registration, sessions, email verification and password reset
//! - `blogs` - Blog posts

pub mod blogs;
pub mod health;
pub mod users;
