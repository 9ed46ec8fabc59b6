//! Shared handler state

use std::sync::Arc;
use std::time::{Duration, Instant};

use feed_common::{AppConfig, JwtService};
use feed_service::ServiceContext;

/// State cloned into every handler
///
/// Cloning is cheap: the context and configuration sit behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    ctx: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    started_at: Instant,
}

impl AppState {
    pub fn new(ctx: ServiceContext, config: AppConfig) -> Self {
        Self {
            ctx: Arc::new(ctx),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verifier for bearer tokens
    pub fn jwt_service(&self) -> &JwtService {
        self.ctx.jwt_service()
    }

    /// Time since the state was built, reported by the health check
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.config.app.name)
            .field("env", &self.config.app.env)
            .field("uptime", &self.uptime())
            .finish_non_exhaustive()
    }
}
