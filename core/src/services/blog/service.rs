//! Blog posting service

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use quill_shared::types::{PaginatedResponse, Pagination};

use crate::domain::entities::account::VerifyStatus;
use crate::domain::entities::blog::{Blog, BlogStatus};
use crate::domain::entities::token::TokenPayload;
use crate::domain::value_objects::{BlogQuery, BlogUpdate};
use crate::errors::{AuthError, BlogError, DomainResult};
use crate::repositories::BlogRepository;

/// The authenticated caller, as read from a validated access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub verify_status: VerifyStatus,
}

impl From<&TokenPayload> for Actor {
    fn from(payload: &TokenPayload) -> Self {
        Self {
            id: payload.sub,
            verify_status: payload.verify,
        }
    }
}

/// Input for a new post
#[derive(Debug, Clone, Default)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub status: Option<BlogStatus>,
    pub tags: Vec<String>,
}

pub struct BlogService<B: BlogRepository> {
    repository: Arc<B>,
}

impl<B: BlogRepository> BlogService<B> {
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    pub async fn create_blog(&self, actor: Actor, input: NewBlog) -> DomainResult<Blog> {
        ensure_can_write(actor)?;
        let blog = Blog::new(actor.id, &input.title, &input.content, input.status, input.tags)?;
        let blog = self.repository.create(blog).await?;

        info!(user_id = %actor.id, blog_id = %blog.id, "Blog created");
        Ok(blog)
    }

    /// Owner-only partial update
    pub async fn update_blog(
        &self,
        actor: Actor,
        blog_id: Uuid,
        update: BlogUpdate,
    ) -> DomainResult<Blog> {
        ensure_can_write(actor)?;
        let update = update.normalized()?;
        let blog = self.owned_blog(actor, blog_id).await?;
        if update.is_empty() {
            return Ok(blog);
        }

        if self.repository.update(blog_id, update).await? == 0 {
            return Err(BlogError::NotFound.into());
        }
        self.repository
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| BlogError::NotFound.into())
    }

    /// Fetch a post and count the view
    pub async fn get_blog(&self, blog_id: Uuid) -> DomainResult<Blog> {
        let mut blog = self
            .repository
            .find_by_id(blog_id)
            .await?
            .ok_or(BlogError::NotFound)?;

        self.repository.increment_view_count(blog_id).await?;
        blog.view_count += 1;
        Ok(blog)
    }

    pub async fn list_blogs(&self, query: BlogQuery) -> DomainResult<PaginatedResponse<Blog>> {
        let pagination = query.pagination.validate();
        let (items, total) = self.repository.list(&query).await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    /// Every post by the caller, drafts included
    pub async fn list_my_blogs(
        &self,
        actor: Actor,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Blog>> {
        self.list_blogs(BlogQuery::by_author(actor.id, pagination)).await
    }

    /// Owner-only soft delete
    pub async fn delete_blog(&self, actor: Actor, blog_id: Uuid) -> DomainResult<()> {
        ensure_can_write(actor)?;
        self.owned_blog(actor, blog_id).await?;

        if self.repository.soft_delete(blog_id).await? == 0 {
            return Err(BlogError::NotFound.into());
        }
        info!(user_id = %actor.id, blog_id = %blog_id, "Blog deleted");
        Ok(())
    }

    async fn owned_blog(&self, actor: Actor, blog_id: Uuid) -> DomainResult<Blog> {
        let blog = self
            .repository
            .find_by_id(blog_id)
            .await?
            .ok_or(BlogError::NotFound)?;
        if !blog.is_authored_by(actor.id) {
            return Err(BlogError::NotOwner.into());
        }
        Ok(blog)
    }
}

fn ensure_can_write(actor: Actor) -> DomainResult<()> {
    match actor.verify_status {
        VerifyStatus::Verified => Ok(()),
        VerifyStatus::Unverified => Err(AuthError::EmailNotVerified.into()),
        VerifyStatus::Banned => Err(AuthError::AccountBanned.into()),
    }
}
