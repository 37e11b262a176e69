//! Request and response bodies for the HTTP API

pub mod blog_dto;
pub mod user_dto;

pub use blog_dto::{BlogListQuery, CreateBlogRequest, UpdateBlogRequest};
pub use user_dto::{
    ForgotPasswordRequest, ForgotPasswordTokenRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, ResetPasswordRequest, UserProfile, VerifyEmailRequest,
};
