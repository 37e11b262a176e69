//! Unit tests for the blog service

use std::sync::Arc;
use uuid::Uuid;

use quill_shared::types::Pagination;

use crate::domain::entities::account::VerifyStatus;
use crate::domain::entities::blog::BlogStatus;
use crate::domain::value_objects::{BlogQuery, BlogUpdate};
use crate::errors::{AuthError, BlogError, DomainError, ValidationError};
use crate::repositories::MockBlogRepository;
use crate::services::blog::{Actor, BlogService, NewBlog};

fn service() -> (BlogService<MockBlogRepository>, Arc<MockBlogRepository>) {
    let repo = Arc::new(MockBlogRepository::new());
    (BlogService::new(repo.clone()), repo)
}

fn verified() -> Actor {
    Actor {
        id: Uuid::new_v4(),
        verify_status: VerifyStatus::Verified,
    }
}

fn draft(title: &str) -> NewBlog {
    NewBlog {
        title: title.to_string(),
        content: "Enough content to pass validation".to_string(),
        status: None,
        tags: vec!["Rust".to_string()],
    }
}

#[tokio::test]
async fn test_create_requires_verified_account() {
    let (service, _repo) = service();

    for (status, expected) in [
        (VerifyStatus::Unverified, AuthError::EmailNotVerified),
        (VerifyStatus::Banned, AuthError::AccountBanned),
    ] {
        let actor = Actor {
            id: Uuid::new_v4(),
            verify_status: status,
        };
        let err = service.create_blog(actor, draft("Hello")).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(e) if e == expected));
    }
}

#[tokio::test]
async fn test_create_validates_and_normalizes() {
    let (service, _repo) = service();
    let actor = verified();

    let blog = service.create_blog(actor, draft("  Hello  ")).await.unwrap();
    assert_eq!(blog.title, "Hello");
    assert_eq!(blog.tags, vec!["rust".to_string()]);
    assert_eq!(blog.author_id, actor.id);
    assert_eq!(blog.status, BlogStatus::Draft);

    let err = service.create_blog(actor, draft("Hi")).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::InvalidLength { .. })
    ));
}

#[tokio::test]
async fn test_get_blog_counts_views() {
    let (service, repo) = service();
    let blog = service.create_blog(verified(), draft("Counted")).await.unwrap();

    assert_eq!(service.get_blog(blog.id).await.unwrap().view_count, 1);
    assert_eq!(service.get_blog(blog.id).await.unwrap().view_count, 2);
    assert_eq!(repo.get_raw(blog.id).await.unwrap().view_count, 2);

    let err = service.get_blog(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Blog(BlogError::NotFound)));
}

#[tokio::test]
async fn test_update_is_owner_only() {
    let (service, _repo) = service();
    let owner = verified();
    let blog = service.create_blog(owner, draft("Original")).await.unwrap();

    let update = BlogUpdate {
        title: Some("Renamed".to_string()),
        status: Some(BlogStatus::Published),
        ..Default::default()
    };

    let err = service
        .update_blog(verified(), blog.id, update.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Blog(BlogError::NotOwner)));

    let updated = service.update_blog(owner, blog.id, update).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.status, BlogStatus::Published);
    assert_eq!(updated.content, blog.content);
}

#[tokio::test]
async fn test_delete_is_soft_and_owner_only() {
    let (service, repo) = service();
    let owner = verified();
    let blog = service.create_blog(owner, draft("Doomed")).await.unwrap();

    let err = service.delete_blog(verified(), blog.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Blog(BlogError::NotOwner)));

    service.delete_blog(owner, blog.id).await.unwrap();
    assert!(repo.get_raw(blog.id).await.unwrap().is_deleted);

    let err = service.get_blog(blog.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Blog(BlogError::NotFound)));
    let err = service.delete_blog(owner, blog.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Blog(BlogError::NotFound)));
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let (service, _repo) = service();
    let alice = verified();
    let bob = verified();

    for i in 0..3 {
        let mut input = draft(&format!("Alice post {}", i));
        input.status = Some(BlogStatus::Published);
        service.create_blog(alice, input).await.unwrap();
    }
    service.create_blog(bob, draft("Bob draft")).await.unwrap();

    let published = service
        .list_blogs(BlogQuery {
            status: Some(BlogStatus::Published),
            pagination: Pagination::new(1, 2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(published.total, 3);
    assert_eq!(published.data.len(), 2);
    assert_eq!(published.total_pages, 2);

    let mine = service
        .list_my_blogs(bob, Pagination::default())
        .await
        .unwrap();
    assert_eq!(mine.total, 1);
    assert_eq!(mine.data[0].title, "Bob draft");
}
