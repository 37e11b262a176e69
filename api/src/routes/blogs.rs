//! Blog endpoints under `/api/v1/blogs`
//!
//! Reads are public. Writes need a bearer whose token says the account is
//! verified; ownership is checked by the blog service.

use actix_web::{web, HttpResponse, Scope};
use uuid::Uuid;
use validator::Validate;

use quill_core::repositories::{AccountRepository, BlogRepository, TokenRepository};
use quill_core::services::Mailer;
use quill_shared::types::{ApiResponse, Pagination};

use crate::app::AppState;
use crate::dto::{BlogListQuery, CreateBlogRequest, UpdateBlogRequest};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

type State<A, R, M, B> = web::Data<AppState<A, R, M, B>>;

/// Routes of the `/blogs` scope; `/my-blogs` is registered before `/{id}`
pub fn scope<A, R, M, B>(auth: JwtAuth) -> Scope
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    web::scope("/blogs")
        .route(
            "",
            web::post()
                .to(create_blog::<A, R, M, B>)
                .wrap(auth.clone()),
        )
        .route("", web::get().to(list_blogs::<A, R, M, B>))
        .route(
            "/my-blogs",
            web::get()
                .to(list_my_blogs::<A, R, M, B>)
                .wrap(auth.clone()),
        )
        .route("/{id}", web::get().to(get_blog::<A, R, M, B>))
        .route(
            "/{id}",
            web::put()
                .to(update_blog::<A, R, M, B>)
                .wrap(auth.clone()),
        )
        .route(
            "/{id}",
            web::delete().to(delete_blog::<A, R, M, B>).wrap(auth),
        )
}

/// Handler for POST /api/v1/blogs
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid bearer
/// - 403 Forbidden: Email not verified
/// - 422 Unprocessable Entity: Title or content rules not met
pub async fn create_blog<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
    request: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    let blog = state
        .blog_service
        .create_blog(auth.actor(), request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(blog).with_message("Blog created")))
}

/// Handler for GET /api/v1/blogs
///
/// Newest first, optionally filtered by `author_id` and `status`.
pub async fn list_blogs<A, R, M, B>(
    state: State<A, R, M, B>,
    query: web::Query<BlogListQuery>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let page = state.blog_service.list_blogs(query.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn list_my_blogs<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
    query: web::Query<BlogListQuery>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let pagination: Pagination = query.pagination();
    let page = state
        .blog_service
        .list_my_blogs(auth.actor(), pagination)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/blogs/{id}
///
/// Counts one view per call.
pub async fn get_blog<A, R, M, B>(
    state: State<A, R, M, B>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let blog = state.blog_service.get_blog(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(blog)))
}

/// Handler for PUT /api/v1/blogs/{id}
///
/// ## Errors
/// - 403 Forbidden: Caller is not the author, or not verified
/// - 404 Not Found: No such blog, or it was deleted
pub async fn update_blog<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateBlogRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let blog = state
        .blog_service
        .update_blog(auth.actor(), path.into_inner(), request.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(blog).with_message("Blog updated")))
}

pub async fn delete_blog<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    state
        .blog_service
        .delete_blog(auth.actor(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Blog deleted")))
}
