//! MySQL implementation of the BlogRepository trait.
//!
//! Tags are stored as a JSON array in a TEXT column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use quill_core::domain::entities::blog::{Blog, BlogStatus};
use quill_core::domain::value_objects::{BlogQuery, BlogUpdate};
use quill_core::errors::DomainError;
use quill_core::repositories::BlogRepository;

use super::db_error;

const BLOG_COLUMNS: &str =
    "id, title, content, author_id, status, tags, view_count, is_deleted, created_at, updated_at";

/// MySQL implementation of BlogRepository
pub struct MySqlBlogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlBlogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn encode_tags(tags: &[String]) -> Result<String, DomainError> {
        serde_json::to_string(tags)
            .map_err(|e| DomainError::internal(format!("Failed to encode tags: {}", e)))
    }

    fn row_to_blog(row: &sqlx::mysql::MySqlRow) -> Result<Blog, DomainError> {
        let id: String = row.try_get("id").map_err(db_error("id"))?;
        let author_id: String = row.try_get("author_id").map_err(db_error("author_id"))?;
        let status: String = row.try_get("status").map_err(db_error("status"))?;
        let tags: String = row.try_get("tags").map_err(db_error("tags"))?;

        Ok(Blog {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid blog UUID: {}", e)))?,
            title: row.try_get("title").map_err(db_error("title"))?,
            content: row.try_get("content").map_err(db_error("content"))?,
            author_id: Uuid::parse_str(&author_id)
                .map_err(|e| DomainError::internal(format!("Invalid author UUID: {}", e)))?,
            status: status.parse::<BlogStatus>().map_err(DomainError::internal)?,
            tags: serde_json::from_str(&tags)
                .map_err(|e| DomainError::internal(format!("Invalid tags: {}", e)))?,
            view_count: row.try_get("view_count").map_err(db_error("view_count"))?,
            is_deleted: row.try_get("is_deleted").map_err(db_error("is_deleted"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(db_error("updated_at"))?,
        })
    }

    /// Append the `WHERE` clause shared by the count and page queries
    fn push_filters(builder: &mut QueryBuilder<'static, MySql>, query: &BlogQuery) {
        builder.push(" WHERE is_deleted = FALSE");
        if let Some(author_id) = query.author_id {
            builder.push(" AND author_id = ").push_bind(author_id.to_string());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
    }
}

#[async_trait]
impl BlogRepository for MySqlBlogRepository {
    async fn create(&self, blog: Blog) -> Result<Blog, DomainError> {
        let query = format!(
            "INSERT INTO blogs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            BLOG_COLUMNS
        );

        sqlx::query(&query)
            .bind(blog.id.to_string())
            .bind(&blog.title)
            .bind(&blog.content)
            .bind(blog.author_id.to_string())
            .bind(blog.status.as_str())
            .bind(Self::encode_tags(&blog.tags)?)
            .bind(blog.view_count)
            .bind(blog.is_deleted)
            .bind(blog.created_at)
            .bind(blog.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create blog: {}", e)))?;

        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError> {
        let query = format!(
            "SELECT {} FROM blogs WHERE id = ? AND is_deleted = FALSE LIMIT 1",
            BLOG_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find blog: {}", e)))?;

        result.map(|row| Self::row_to_blog(&row)).transpose()
    }

    async fn update(&self, id: Uuid, update: BlogUpdate) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE blogs SET ");
        {
            let mut set = builder.separated(", ");
            set.push("updated_at = ").push_bind_unseparated(Utc::now());
            if let Some(title) = update.title {
                set.push("title = ").push_bind_unseparated(title);
            }
            if let Some(content) = update.content {
                set.push("content = ").push_bind_unseparated(content);
            }
            if let Some(status) = update.status {
                set.push("status = ").push_bind_unseparated(status.as_str());
            }
            if let Some(tags) = update.tags {
                set.push("tags = ")
                    .push_bind_unseparated(Self::encode_tags(&tags)?);
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(" AND is_deleted = FALSE");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update blog: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE blogs SET view_count = view_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count blog view: {}", e)))?;

        Ok(())
    }

    async fn list(&self, query: &BlogQuery) -> Result<(Vec<Blog>, u64), DomainError> {
        let page = query.pagination.validate();

        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) AS total FROM blogs");
        Self::push_filters(&mut count, query);
        let total: i64 = count
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count blogs: {}", e)))?
            .try_get("total")
            .map_err(db_error("total"))?;

        let mut select = QueryBuilder::<MySql>::new(format!("SELECT {} FROM blogs", BLOG_COLUMNS));
        Self::push_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list blogs: {}", e)))?;

        let blogs = rows
            .iter()
            .map(Self::row_to_blog)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((blogs, total as u64))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE blogs
            SET is_deleted = TRUE, updated_at = ?
            WHERE id = ? AND is_deleted = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete blog: {}", e)))?;

        Ok(result.rows_affected())
    }
}
