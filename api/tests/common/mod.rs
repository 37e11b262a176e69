//! Shared wiring for the HTTP integration tests

#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web,
};
use serde_json::{json, Value};
use std::sync::Arc;

use quill_api::AppState;
use quill_core::clock::{Clock, FixedClock};
use quill_core::services::mail::MailSubject;
use quill_core::services::{
    AuthService, AuthServiceConfig, BlogService, SessionManager, TokenCodec, TokenCodecConfig,
};
use quill_infra::{
    InMemoryAccountRepository, InMemoryBlogRepository, InMemoryTokenRepository, OutboxMailer,
};
use quill_shared::config::{AuthConfig, CorsConfig, ServerConfig};

pub const PASSWORD: &str = "Secr3t!pass";

pub type TestState =
    AppState<InMemoryAccountRepository, InMemoryTokenRepository, OutboxMailer, InMemoryBlogRepository>;

pub struct TestContext {
    pub clock: FixedClock,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub outbox: OutboxMailer,
    pub state: web::Data<TestState>,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = FixedClock::starting_now();
        let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let auth = AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        };

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::with_clock(shared_clock.clone()));
        let blogs = Arc::new(InMemoryBlogRepository::new());
        let outbox = OutboxMailer::default();

        let codec = Arc::new(TokenCodec::new(TokenCodecConfig::from(&auth), shared_clock));
        let sessions = Arc::new(SessionManager::new(codec, tokens.clone()));
        let auth_service = Arc::new(AuthService::new(
            accounts.clone(),
            sessions,
            Arc::new(outbox.clone()),
            AuthServiceConfig::from(&auth),
        ));
        let blog_service = Arc::new(BlogService::new(blogs));

        Self {
            clock,
            accounts,
            tokens,
            outbox,
            state: web::Data::new(AppState::new(auth_service, blog_service)),
            server: ServerConfig::default(),
            cors: CorsConfig::development(),
        }
    }

    pub async fn verify_token_for(&self, email: &str) -> String {
        self.outbox
            .latest_token(email, MailSubject::VerifyEmail)
            .await
            .expect("verification mail")
    }

    pub async fn reset_token_for(&self, email: &str) -> String {
        self.outbox
            .latest_token(email, MailSubject::ResetPassword)
            .await
            .expect("reset mail")
    }
}

/// Build the application for a context
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(quill_api::create_app(
            $ctx.state.clone(),
            &$ctx.server,
            &$ctx.cors,
        ))
        .await
    };
}

/// Send a request and decode the JSON body (`Null` when empty)
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, req).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, json)
}

pub fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn with_bearer(req: test::TestRequest, access_token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", access_token)))
}

pub fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    })
}

/// Tokens from an `ApiResponse<AuthResponse>` body
pub fn tokens_of(body: &Value) -> (String, String) {
    (
        body["data"]["access_token"].as_str().expect("access_token").to_string(),
        body["data"]["refresh_token"].as_str().expect("refresh_token").to_string(),
    )
}
