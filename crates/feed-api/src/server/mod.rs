//! Server setup and initialization

use std::sync::Arc;

use axum::Router;
use feed_common::{AppConfig, AppError, JwtService};
use feed_db::{create_pool, run_migrations, DatabaseConfig};
use feed_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit, MiddlewareConfig};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application
///
/// Health probes are merged after the rate limiter so they are never throttled.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let middleware = MiddlewareConfig {
        rate_limit: &config.rate_limit,
        cors: &config.cors,
        request_timeout: config.http.request_timeout(),
        is_production: config.app.env.is_production(),
    };

    let api = apply_rate_limit(create_router(), middleware.rate_limit);
    let router = apply_middleware(api.merge(health_routes()), &middleware);

    router.with_state(state)
}

/// Connect to PostgreSQL, apply migrations and assemble the AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig::new(config.database.url.clone()).with_limits(
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContext::postgres(pool, jwt_service);

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already-bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
