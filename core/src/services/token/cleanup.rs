//! Periodic removal of expired refresh records
//!
//! Reads already ignore expired records; this keeps the store from growing
//! without bound.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Service for cleaning up expired refresh records
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    config: TokenCleanupConfig,
    shutdown: Arc<AtomicBool>,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, config: TokenCleanupConfig) -> Self {
        Self {
            repository,
            clock,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        debug!("Starting token cleanup cycle");
        let deleted = self.repository.delete_expired(self.clock.now()).await?;
        if deleted > 0 {
            info!(deleted, "Deleted expired refresh records");
        }

        Ok(CleanupResult {
            expired_tokens_deleted: deleted,
        })
    }

    /// Flag the background loop to exit after its current tick
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Start the cleanup service as a background task
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                if self.shutdown.load(Ordering::SeqCst) {
                    info!("Token cleanup service stopped");
                    break;
                }

                if let Err(e) = self.run_cleanup().await {
                    error!("Token cleanup cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired refresh records deleted
    pub expired_tokens_deleted: usize,
}
