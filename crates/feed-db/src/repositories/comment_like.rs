//! PostgreSQL implementation of CommentLikeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use feed_core::entities::CommentLikeToggle;
use feed_core::traits::{CommentLikeRepository, RepoResult};
use feed_core::value_objects::{CommentId, UserId};

use super::error::{comment_not_found, finish, map_db_error};

/// PostgreSQL implementation of CommentLikeRepository
#[derive(Clone)]
pub struct PgCommentLikeRepository {
    pool: PgPool,
}

impl PgCommentLikeRepository {
    /// Create a new PgCommentLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn toggle_in(
        conn: &mut PgConnection,
        comment_id: CommentId,
        user_id: UserId,
    ) -> RepoResult<CommentLikeToggle> {
        // Lock the comment so toggles by the same user apply one after another
        sqlx::query_scalar::<_, i64>(
            "SELECT id FROM comments WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(comment_id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| comment_not_found(comment_id))?;

        let removed =
            sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
                .bind(comment_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&mut *conn)
                .await
                .map_err(map_db_error)?
                .rows_affected();

        let liked = removed == 0;
        if liked {
            sqlx::query(
                r#"
                INSERT INTO comment_likes (comment_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (comment_id, user_id) DO NOTHING
                "#,
            )
            .bind(comment_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;
        }

        let like_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
                .bind(comment_id.into_inner())
                .fetch_one(&mut *conn)
                .await
                .map_err(map_db_error)?;

        Ok(CommentLikeToggle { liked, like_count })
    }
}

#[async_trait]
impl CommentLikeRepository for PgCommentLikeRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        comment_id: CommentId,
        user_id: UserId,
    ) -> RepoResult<CommentLikeToggle> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::toggle_in(&mut tx, comment_id, user_id).await;
        finish(tx, result).await
    }
}
