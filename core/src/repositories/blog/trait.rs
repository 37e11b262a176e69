//! Blog repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::blog::Blog;
use crate::domain::value_objects::{BlogQuery, BlogUpdate};
use crate::errors::DomainError;

/// Persistence for blog posts. Soft-deleted posts are invisible to every read.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: Blog) -> Result<Blog, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError>;

    /// Apply a partial update to a live post
    ///
    /// # Returns
    /// * `Ok(matched)` - `0` if the post is missing or deleted
    async fn update(&self, id: Uuid, update: BlogUpdate) -> Result<u64, DomainError>;

    async fn increment_view_count(&self, id: Uuid) -> Result<(), DomainError>;

    /// One page of matching posts, newest first, plus the total match count
    async fn list(&self, query: &BlogQuery) -> Result<(Vec<Blog>, u64), DomainError>;

    /// Mark a post as deleted
    ///
    /// # Returns
    /// * `Ok(matched)` - `0` if the post is missing or already deleted
    async fn soft_delete(&self, id: Uuid) -> Result<u64, DomainError>;
}
