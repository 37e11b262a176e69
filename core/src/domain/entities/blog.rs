//! Blog post entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::ValidationError;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MIN_LEN: usize = 10;

/// Publication state of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
            BlogStatus::Archived => "archived",
        }
    }
}

impl Default for BlogStatus {
    fn default() -> Self {
        BlogStatus::Draft
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(BlogStatus::Draft),
            "published" => Ok(BlogStatus::Published),
            "archived" => Ok(BlogStatus::Archived),
            other => Err(format!("Unknown blog status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub status: BlogStatus,
    pub tags: Vec<String>,
    pub view_count: u64,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Validates and normalizes the input into a new post
    pub fn new(
        author_id: Uuid,
        title: &str,
        content: &str,
        status: Option<BlogStatus>,
        tags: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;
        let content = validate_content(content)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            author_id,
            status: status.unwrap_or_default(),
            tags: normalize_tags(tags),
            view_count: 0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_authored_by(&self, account_id: Uuid) -> bool {
        self.author_id == account_id
    }
}

/// Trimmed title between 3 and 200 characters
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 {
        return Err(ValidationError::RequiredField {
            field: "title".to_string(),
        });
    }
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        return Err(ValidationError::InvalidLength {
            field: "title".to_string(),
            min: TITLE_MIN_LEN,
            max: TITLE_MAX_LEN,
        });
    }
    Ok(title.to_string())
}

/// Trimmed content of at least 10 characters
pub fn validate_content(content: &str) -> Result<String, ValidationError> {
    let content = content.trim();
    let len = content.chars().count();
    if len == 0 {
        return Err(ValidationError::RequiredField {
            field: "content".to_string(),
        });
    }
    if len < CONTENT_MIN_LEN {
        return Err(ValidationError::InvalidLength {
            field: "content".to_string(),
            min: CONTENT_MIN_LEN,
            max: usize::MAX,
        });
    }
    Ok(content.to_string())
}

/// Lowercase, trim, drop empties and duplicates while keeping first-seen order
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blog_defaults_to_draft() {
        let author = Uuid::new_v4();
        let blog = Blog::new(author, "  Hello world ", "Some long content here", None, vec![])
            .unwrap();

        assert_eq!(blog.title, "Hello world");
        assert_eq!(blog.status, BlogStatus::Draft);
        assert_eq!(blog.view_count, 0);
        assert!(blog.is_authored_by(author));
        assert!(!blog.is_deleted);
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("ab").is_err());
        assert!(validate_title("abc").is_ok());
        assert!(validate_title(&"x".repeat(201)).is_err());
        assert!(matches!(
            validate_title("   "),
            Err(ValidationError::RequiredField { .. })
        ));
    }

    #[test]
    fn test_content_minimum() {
        assert!(validate_content("too short").is_err());
        assert!(validate_content("long enough").is_ok());
    }

    #[test]
    fn test_tags_normalized() {
        let tags = normalize_tags(vec![
            " Rust ".into(),
            "rust".into(),
            "".into(),
            "Web".into(),
        ]);
        assert_eq!(tags, vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Published".parse::<BlogStatus>(), Ok(BlogStatus::Published));
        assert!("deleted".parse::<BlogStatus>().is_err());
    }
}
