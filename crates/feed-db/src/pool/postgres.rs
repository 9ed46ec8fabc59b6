//! Postgres pool and schema migrations

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Pool sizing and connection lifetimes
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
    const IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
    const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Self::ACQUIRE_TIMEOUT,
            idle_timeout: Self::IDLE_TIMEOUT,
            max_lifetime: Self::MAX_LIFETIME,
        }
    }

    /// Pool bounds; the floor never exceeds the ceiling
    #[must_use]
    pub fn with_limits(self, max_connections: u32, min_connections: u32) -> Self {
        Self {
            max_connections,
            min_connections: min_connections.min(max_connections),
            ..self
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Some(self.idle_timeout))
            .max_lifetime(Some(self.max_lifetime))
    }
}

/// Open the pool, failing fast if the first connection cannot be made
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = config.options().connect(&config.url).await?;
    info!(
        max = config.max_connections,
        min = config.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply the `.sql` files in `dir` not yet recorded in `_sqlx_migrations`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    Migrator::new(dir).await?.run(pool).await?;
    info!(dir = %dir.display(), "Database migrations applied");
    Ok(())
}
