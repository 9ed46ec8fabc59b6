//! PostgreSQL implementation of ShareRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use feed_core::entities::Share;
use feed_core::traits::{RepoResult, ShareRepository};
use feed_core::value_objects::{PostId, UserId};

use crate::models::ShareModel;

use super::error::{finish, lock_post, map_db_error};

/// PostgreSQL implementation of ShareRepository
#[derive(Clone)]
pub struct PgShareRepository {
    pool: PgPool,
}

impl PgShareRepository {
    /// Create a new PgShareRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn record_in(
        conn: &mut PgConnection,
        post_id: PostId,
        user_id: UserId,
        shared_to: Option<&str>,
    ) -> RepoResult<i64> {
        lock_post(&mut *conn, post_id).await?;

        sqlx::query("INSERT INTO shares (post_id, user_id, shared_to) VALUES ($1, $2, $3)")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .bind(shared_to)
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts
            SET shares_count = (SELECT COUNT(*) FROM shares WHERE post_id = $1)
            WHERE id = $1
            RETURNING shares_count
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl ShareRepository for PgShareRepository {
    #[instrument(skip(self))]
    async fn record(
        &self,
        post_id: PostId,
        user_id: UserId,
        shared_to: Option<&str>,
    ) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::record_in(&mut tx, post_id, user_id, shared_to).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn list_for_post(&self, post_id: PostId) -> RepoResult<Vec<Share>> {
        let results = sqlx::query_as::<_, ShareModel>(
            r#"
            SELECT id, post_id, user_id, shared_to, created_at
            FROM shares
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Share::from).collect())
    }
}
