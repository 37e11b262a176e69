//! Mock implementation of BlogRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::blog::Blog;
use crate::domain::value_objects::{BlogQuery, BlogUpdate};
use crate::errors::DomainError;

use super::r#trait::BlogRepository;

#[derive(Clone, Default)]
pub struct MockBlogRepository {
    blogs: Arc<RwLock<HashMap<Uuid, Blog>>>,
}

impl MockBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read including soft-deleted posts
    pub async fn get_raw(&self, id: Uuid) -> Option<Blog> {
        self.blogs.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl BlogRepository for MockBlogRepository {
    async fn create(&self, blog: Blog) -> Result<Blog, DomainError> {
        self.blogs.write().await.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError> {
        let blogs = self.blogs.read().await;
        Ok(blogs.get(&id).filter(|b| !b.is_deleted).cloned())
    }

    async fn update(&self, id: Uuid, update: BlogUpdate) -> Result<u64, DomainError> {
        let mut blogs = self.blogs.write().await;
        match blogs.get_mut(&id).filter(|b| !b.is_deleted) {
            Some(blog) => {
                update.apply_to(blog, Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<(), DomainError> {
        if let Some(blog) = self.blogs.write().await.get_mut(&id) {
            blog.view_count += 1;
        }
        Ok(())
    }

    async fn list(&self, query: &BlogQuery) -> Result<(Vec<Blog>, u64), DomainError> {
        let blogs = self.blogs.read().await;
        Ok(query.select(blogs.values()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, DomainError> {
        let mut blogs = self.blogs.write().await;
        match blogs.get_mut(&id).filter(|b| !b.is_deleted) {
            Some(blog) => {
                blog.is_deleted = true;
                blog.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
