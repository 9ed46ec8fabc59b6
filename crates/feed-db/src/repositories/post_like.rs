//! PostgreSQL implementation of PostLikeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use feed_core::entities::{LikeAction, PostLikeToggle};
use feed_core::traits::{PostLikeRepository, RepoResult};
use feed_core::value_objects::{PostId, UserId};

use super::error::{finish, lock_post, map_db_error};

/// PostgreSQL implementation of PostLikeRepository
#[derive(Clone)]
pub struct PgPostLikeRepository {
    pool: PgPool,
}

impl PgPostLikeRepository {
    /// Create a new PgPostLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn toggle_in(
        conn: &mut PgConnection,
        post_id: PostId,
        user_id: UserId,
    ) -> RepoResult<PostLikeToggle> {
        lock_post(&mut *conn, post_id).await?;

        let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let action = LikeAction::from_existing(removed > 0);
        if action == LikeAction::Added {
            sqlx::query(
                r#"
                INSERT INTO likes (post_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (post_id, user_id) DO NOTHING
                "#,
            )
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;
        }

        let likes_count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts
            SET likes_count = (SELECT COUNT(*) FROM likes WHERE post_id = $1)
            WHERE id = $1
            RETURNING likes_count
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(PostLikeToggle {
            action,
            likes_count,
        })
    }
}

#[async_trait]
impl PostLikeRepository for PgPostLikeRepository {
    #[instrument(skip(self))]
    async fn toggle(&self, post_id: PostId, user_id: UserId) -> RepoResult<PostLikeToggle> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::toggle_in(&mut tx, post_id, user_id).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn exists(&self, post_id: PostId, user_id: UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
