//! PostgreSQL implementation of BusinessRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use feed_core::entities::Business;
use feed_core::traits::{BusinessRepository, RepoResult};
use feed_core::value_objects::BusinessId;

use crate::models::BusinessModel;

use super::error::map_db_error;

/// PostgreSQL implementation of BusinessRepository
#[derive(Clone)]
pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    /// Create a new PgBusinessRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BusinessId) -> RepoResult<Option<Business>> {
        let result = sqlx::query_as::<_, BusinessModel>(
            r#"
            SELECT id, owner_id, name, logo, created_at
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Business::from))
    }
}
