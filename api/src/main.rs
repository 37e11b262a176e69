use actix_web::{web, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quill_api::{create_app, AppState};
use quill_core::clock::{Clock, SystemClock};
use quill_core::repositories::{AccountRepository, BlogRepository, TokenRepository};
use quill_core::services::{
    AuthService, AuthServiceConfig, BlogService, SessionManager, TokenCleanupConfig,
    TokenCleanupService, TokenCodec, TokenCodecConfig,
};
use quill_infra::database::DatabasePool;
use quill_infra::{InMemoryAccountRepository, InMemoryBlogRepository, InMemoryTokenRepository, LogMailer};
use quill_shared::config::{AppConfig, Environment, LogFormat, LoggingConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if dotenvy::from_filename(Environment::from_env().env_file()).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        backend = ?config.database.backend,
        "Starting Quill API server"
    );

    let missing = config.auth.tokens.missing_secrets();
    if !missing.is_empty() {
        warn!(
            kinds = ?missing,
            "Token secrets not configured; operations using these kinds will fail"
        );
    }

    match config.database.backend {
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            pool.ping().await?;
            pool.run_migrations().await?;
            info!("{}", pool.get_statistics());

            let repos = pool.repositories();
            let result = serve(config, repos.accounts, repos.tokens, repos.blogs).await;

            pool.close().await;
            result
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; all accounts and sessions are lost on restart");
            serve(
                config,
                Arc::new(InMemoryAccountRepository::new()),
                Arc::new(InMemoryTokenRepository::new()),
                Arc::new(InMemoryBlogRepository::new()),
            )
            .await
        }
    }
}

/// Wire the services over the chosen repositories and run the HTTP server
/// until shutdown
async fn serve<A, R, B>(
    config: AppConfig,
    accounts: Arc<A>,
    tokens: Arc<R>,
    blogs: Arc<B>,
) -> anyhow::Result<()>
where
    A: AccountRepository + 'static,
    R: TokenRepository + 'static,
    B: BlogRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let codec = Arc::new(TokenCodec::new(
        TokenCodecConfig::from(&config.auth),
        clock.clone(),
    ));
    let sessions = Arc::new(SessionManager::new(codec, tokens.clone()));
    let mailer = Arc::new(LogMailer::new(config.mail.clone()));

    let auth_service = Arc::new(AuthService::new(
        accounts,
        sessions,
        mailer,
        AuthServiceConfig::from(&config.auth),
    ));
    let blog_service = Arc::new(BlogService::new(blogs));
    let state = web::Data::new(AppState::new(auth_service, blog_service));

    let cleanup = Arc::new(TokenCleanupService::new(
        tokens,
        clock,
        TokenCleanupConfig {
            interval_seconds: config.auth.cleanup_interval_seconds,
            enabled: true,
        },
    ));
    let cleanup_task = cleanup.clone().start_background_task();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &server_config, &cors_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped");
    cleanup.stop();
    if let Some(task) = cleanup_task {
        task.abort();
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
