//! In-memory blog repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::entities::blog::Blog;
use quill_core::domain::value_objects::{BlogQuery, BlogUpdate};
use quill_core::errors::DomainError;
use quill_core::repositories::BlogRepository;

#[derive(Clone, Default)]
pub struct InMemoryBlogRepository {
    blogs: Arc<RwLock<HashMap<Uuid, Blog>>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn create(&self, blog: Blog) -> Result<Blog, DomainError> {
        self.blogs.write().await.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError> {
        Ok(self
            .blogs
            .read()
            .await
            .get(&id)
            .filter(|b| !b.is_deleted)
            .cloned())
    }

    async fn update(&self, id: Uuid, update: BlogUpdate) -> Result<u64, DomainError> {
        let mut blogs = self.blogs.write().await;
        match blogs.get_mut(&id) {
            Some(blog) if !blog.is_deleted => {
                update.apply_to(blog, Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<(), DomainError> {
        if let Some(blog) = self.blogs.write().await.get_mut(&id) {
            blog.view_count += 1;
        }
        Ok(())
    }

    async fn list(&self, query: &BlogQuery) -> Result<(Vec<Blog>, u64), DomainError> {
        Ok(query.select(self.blogs.read().await.values()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, DomainError> {
        let mut blogs = self.blogs.write().await;
        match blogs.get_mut(&id) {
            Some(blog) if !blog.is_deleted => {
                blog.is_deleted = true;
                blog.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
