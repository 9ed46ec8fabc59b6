//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use feed_core::entities::{Comment, CommentView, NewComment};
use feed_core::error::DomainError;
use feed_core::traits::{CommentRepository, RepoResult};
use feed_core::value_objects::{CommentId, PostId, UserId};

use crate::models::{CommentModel, CommentViewModel};

use super::error::{comment_not_found, finish, lock_post, map_db_error};

/// Columns of a comment as seen by viewer `$2`.
///
/// Author name and logo come from the first business the author owns and
/// fall back to empty strings.
const VIEW_SELECT: &str = r#"
    SELECT
        c.id, c.post_id, c.user_id, c.content, c.parent_id,
        c.created_at, c.updated_at, c.deleted_at,
        COALESCE(b.name, '') AS user_name,
        COALESCE(b.logo, '') AS user_logo,
        (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS likes_count,
        EXISTS (
            SELECT 1 FROM comment_likes cl WHERE cl.comment_id = c.id AND cl.user_id = $2
        ) AS liked_by_user,
        (SELECT COUNT(*) FROM comments r WHERE r.parent_id = c.id AND r.deleted_at IS NULL)
            AS reply_count
    FROM comments c
    LEFT JOIN LATERAL (
        SELECT name, logo FROM businesses WHERE owner_id = c.user_id ORDER BY id LIMIT 1
    ) b ON TRUE
"#;

const RECOUNT_COMMENTS: &str = r#"
    UPDATE posts
    SET comments_count = (
        SELECT COUNT(*) FROM comments WHERE post_id = $1 AND deleted_at IS NULL
    )
    WHERE id = $1
    RETURNING comments_count
"#;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn recount(conn: &mut PgConnection, post_id: PostId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(RECOUNT_COMMENTS)
            .bind(post_id.into_inner())
            .fetch_one(conn)
            .await
            .map_err(map_db_error)
    }

    async fn create_in(
        conn: &mut PgConnection,
        new: &NewComment,
    ) -> RepoResult<(CommentView, i64)> {
        lock_post(&mut *conn, new.post_id).await?;

        if let Some(parent_id) = new.parent_id {
            let parent = sqlx::query_as::<_, CommentModel>(
                r#"
                SELECT id, post_id, user_id, content, parent_id, created_at, updated_at, deleted_at
                FROM comments
                WHERE id = $1
                "#,
            )
            .bind(parent_id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?
            .map(Comment::from)
            .ok_or_else(|| comment_not_found(parent_id))?;

            if !parent.accepts_replies_on(new.post_id) {
                return Err(DomainError::InvalidParent);
            }
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO comments (post_id, user_id, content, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.post_id.into_inner())
        .bind(new.user_id.into_inner())
        .bind(&new.content)
        .bind(new.parent_id.map(CommentId::into_inner))
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let comments_count = Self::recount(&mut *conn, new.post_id).await?;

        let sql = format!("{VIEW_SELECT} WHERE c.id = $1");
        let view = sqlx::query_as::<_, CommentViewModel>(&sql)
            .bind(id)
            .bind(new.user_id.into_inner())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok((CommentView::from(view), comments_count))
    }

    async fn soft_delete_in(
        conn: &mut PgConnection,
        id: CommentId,
        actor: UserId,
    ) -> RepoResult<i64> {
        let post_id = sqlx::query_scalar::<_, i64>("SELECT post_id FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?
            .map(PostId::new)
            .ok_or_else(|| comment_not_found(id))?;

        // Post first, same order as create, so recounts on one post run one at a time
        lock_post(&mut *conn, post_id).await?;

        let comment = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, user_id, content, parent_id, created_at, updated_at, deleted_at
            FROM comments
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .filter(|model| !model.is_deleted())
        .map(Comment::from)
        .ok_or_else(|| comment_not_found(id))?;

        if !comment.is_authored_by(actor) {
            return Err(DomainError::NotCommentAuthor);
        }

        sqlx::query("UPDATE comments SET deleted_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Self::recount(&mut *conn, comment.post_id).await
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, user_id, content, parent_id, created_at, updated_at, deleted_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id, user_id = %comment.user_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<(CommentView, i64)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::create_in(&mut tx, comment).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: CommentId, actor: UserId) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::soft_delete_in(&mut tx, id, actor).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn list_roots(&self, post_id: PostId, viewer: UserId) -> RepoResult<Vec<CommentView>> {
        let sql = format!(
            "{VIEW_SELECT} WHERE c.post_id = $1 AND c.parent_id IS NULL AND c.deleted_at IS NULL \
             ORDER BY c.created_at DESC, c.id DESC"
        );
        let results = sqlx::query_as::<_, CommentViewModel>(&sql)
            .bind(post_id.into_inner())
            .bind(viewer.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentView::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_replies(
        &self,
        parent_id: CommentId,
        viewer: UserId,
    ) -> RepoResult<Vec<CommentView>> {
        let sql = format!(
            "{VIEW_SELECT} WHERE c.parent_id = $1 AND c.deleted_at IS NULL \
             ORDER BY c.created_at ASC, c.id ASC"
        );
        let results = sqlx::query_as::<_, CommentViewModel>(&sql)
            .bind(parent_id.into_inner())
            .bind(viewer.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentView::from).collect())
    }
}
