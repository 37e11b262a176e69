//! Blog update and listing parameters.

use chrono::{DateTime, Utc};
use quill_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::blog::{self, Blog, BlogStatus};
use crate::errors::ValidationError;

/// Fields a blog update may change; all optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<BlogStatus>,
    pub tags: Option<Vec<String>>,
}

impl BlogUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none() && self.tags.is_none()
    }

    /// Validate provided fields and normalize them the way `Blog::new` does
    pub fn normalized(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: self.title.as_deref().map(blog::validate_title).transpose()?,
            content: self.content.as_deref().map(blog::validate_content).transpose()?,
            status: self.status,
            tags: self.tags.map(blog::normalize_tags),
        })
    }

    pub fn apply_to(&self, blog: &mut Blog, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            blog.title = title.clone();
        }
        if let Some(content) = &self.content {
            blog.content = content.clone();
        }
        if let Some(status) = self.status {
            blog.status = status;
        }
        if let Some(tags) = &self.tags {
            blog.tags = tags.clone();
        }
        blog.updated_at = now;
    }
}

/// Filters for listing non-deleted posts, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub author_id: Option<Uuid>,
    pub status: Option<BlogStatus>,
    pub pagination: Pagination,
}

impl BlogQuery {
    pub fn by_author(author_id: Uuid, pagination: Pagination) -> Self {
        Self {
            author_id: Some(author_id),
            status: None,
            pagination,
        }
    }

    pub fn matches(&self, blog: &Blog) -> bool {
        !blog.is_deleted
            && self.author_id.map_or(true, |id| blog.author_id == id)
            && self.status.map_or(true, |s| blog.status == s)
    }

    /// Filter, sort newest first and cut one page out of an in-memory collection
    pub fn select<'a, I>(&self, blogs: I) -> (Vec<Blog>, u64)
    where
        I: IntoIterator<Item = &'a Blog>,
    {
        let mut matching: Vec<&Blog> = blogs.into_iter().filter(|b| self.matches(b)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;

        let page = self.pagination.validate();
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        (items, total)
    }
}
