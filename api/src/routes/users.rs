//! Account and session endpoints under `/api/v1/users`

use actix_web::{web, HttpResponse, Scope};
use validator::Validate;

use quill_core::repositories::{AccountRepository, BlogRepository, TokenRepository};
use quill_core::services::Mailer;
use quill_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{
    ForgotPasswordRequest, ForgotPasswordTokenRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, ResetPasswordRequest, UserProfile, VerifyEmailRequest,
};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

type State<A, R, M, B> = web::Data<AppState<A, R, M, B>>;

/// Routes of the `/users` scope; `auth` guards the bearer-only ones
pub fn scope<A, R, M, B>(auth: JwtAuth) -> Scope
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    web::scope("/users")
        .route("/register", web::post().to(register::<A, R, M, B>))
        .route("/login", web::post().to(login::<A, R, M, B>))
        .route("/logout", web::post().to(logout::<A, R, M, B>))
        .route("/refresh-token", web::post().to(refresh_token::<A, R, M, B>))
        .route("/verify-email", web::post().to(verify_email::<A, R, M, B>))
        .route(
            "/resend-verify-email",
            web::post()
                .to(resend_verify_email::<A, R, M, B>)
                .wrap(auth.clone()),
        )
        .route("/forgot-password", web::post().to(forgot_password::<A, R, M, B>))
        .route(
            "/verify-forgot-password",
            web::post().to(verify_forgot_password::<A, R, M, B>),
        )
        .route("/reset-password", web::post().to(reset_password::<A, R, M, B>))
        .route("/me", web::get().to(me::<A, R, M, B>).wrap(auth))
}

/// Handler for POST /api/v1/users/register
///
/// Creates an unverified account, mails the verification link and signs
/// the account in.
///
/// ## Errors
/// - 409 Conflict: Email already registered
/// - 422 Unprocessable Entity: Email or password rules not met
pub async fn register<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    let response = state
        .auth_service
        .register(&request.email, &request.password, &request.confirm_password)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response).with_message("Register success")))
}

/// Handler for POST /api/v1/users/login
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password
/// - 403 Forbidden: Email not verified or account banned
pub async fn login<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message("Login success")))
}

/// Handler for POST /api/v1/users/logout
///
/// Revokes one refresh token. Logging out twice is not an error.
pub async fn logout<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    state.auth_service.logout(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Logout success")))
}

/// Handler for POST /api/v1/users/refresh-token
///
/// The new refresh token keeps the expiry of the one it replaces.
///
/// ## Errors
/// - 401 Unauthorized: Token invalid, expired, revoked or already rotated
/// - 403 Forbidden: Account banned
pub async fn refresh_token<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    let response = state.auth_service.refresh(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message("Refresh token success")))
}

pub async fn verify_email<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    let response = state
        .auth_service
        .verify_email(&request.email_verify_token)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message("Email verify success")))
}

pub async fn resend_verify_email<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    state.auth_service.resend_verify_email(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Verification email sent")))
}

pub async fn forgot_password<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    state.auth_service.forgot_password(&request.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Check your email to reset password")))
}

pub async fn verify_forgot_password<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<ForgotPasswordTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    state
        .auth_service
        .verify_forgot_password(&request.forgot_password_token)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Verify forgot password success")))
}

pub async fn reset_password<A, R, M, B>(
    state: State<A, R, M, B>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    request.validate()?;
    state
        .auth_service
        .reset_password(
            &request.forgot_password_token,
            &request.password,
            &request.confirm_password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Reset password success")))
}

/// Handler for GET /api/v1/users/me
pub async fn me<A, R, M, B>(
    state: State<A, R, M, B>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    M: Mailer + 'static,
    B: BlogRepository + 'static,
{
    let account = state.auth_service.me(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserProfile::from(account))))
}
