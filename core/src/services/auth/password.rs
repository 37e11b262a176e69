//! bcrypt password hashing

use crate::errors::{DomainError, DomainResult};

pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
}

/// A hash that fails to parse never verifies
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
