//! Blog request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::entities::blog::BlogStatus;
use quill_core::domain::value_objects::{BlogQuery, BlogUpdate};
use quill_core::services::NewBlog;
use quill_shared::types::Pagination;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub status: Option<BlogStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateBlogRequest> for NewBlog {
    fn from(request: CreateBlogRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            status: request.status,
            tags: request.tags,
        }
    }
}

/// Partial update; absent fields stay unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<BlogStatus>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateBlogRequest> for BlogUpdate {
    fn from(request: UpdateBlogRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            status: request.status,
            tags: request.tags,
        }
    }
}

/// Query string of `GET /blogs`
#[derive(Debug, Default, Deserialize)]
pub struct BlogListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author_id: Option<Uuid>,
    pub status: Option<BlogStatus>,
}

impl BlogListQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        )
    }
}

impl From<BlogListQuery> for BlogQuery {
    fn from(query: BlogListQuery) -> Self {
        Self {
            author_id: query.author_id,
            status: query.status,
            pagination: query.pagination(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults_and_clamps() {
        let query: BlogQuery = BlogListQuery {
            page: Some(0),
            limit: Some(1000),
            ..Default::default()
        }
        .into();

        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.limit, 100);
        assert!(query.author_id.is_none());
    }

    #[test]
    fn test_update_request_keeps_absent_fields_empty() {
        let request: UpdateBlogRequest =
            serde_json::from_str(r#"{"status":"published"}"#).unwrap();
        let update = BlogUpdate::from(request);

        assert_eq!(update.status, Some(BlogStatus::Published));
        assert!(update.title.is_none());
        assert!(update.tags.is_none());
    }
}
