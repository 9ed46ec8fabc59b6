//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use feed_core::entities::{NewMedia, NewPost, Post, PostUpdate, PostWithMedia};
use feed_core::traits::{PostRepository, RepoResult};
use feed_core::value_objects::{BusinessId, MediaId, PostId, UserId};

use crate::mappers::{attach_media, with_media};
use crate::models::{PostMediaModel, PostModel, PostRowModel};

use super::error::{finish, lock_post, map_db_error, post_not_found};

const POST_COLUMNS: &str = "id, business_id, content, post_type, likes_count, comments_count, \
                            shares_count, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn media_for(
        conn: &mut PgConnection,
        post_ids: &[i64],
    ) -> RepoResult<Vec<PostMediaModel>> {
        sqlx::query_as::<_, PostMediaModel>(
            r#"
            SELECT id, post_id, media_url, media_type, uploaded_at
            FROM post_media
            WHERE post_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(post_ids)
        .fetch_all(conn)
        .await
        .map_err(map_db_error)
    }

    async fn insert_media(
        conn: &mut PgConnection,
        post_id: i64,
        media: &[NewMedia],
    ) -> RepoResult<()> {
        for item in media {
            sqlx::query(
                "INSERT INTO post_media (post_id, media_url, media_type) VALUES ($1, $2, $3)",
            )
            .bind(post_id)
            .bind(&item.media_url)
            .bind(&item.media_type)
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;
        }
        Ok(())
    }

    async fn create_in(conn: &mut PgConnection, new: &NewPost) -> RepoResult<PostWithMedia> {
        let sql = format!(
            "INSERT INTO posts (business_id, content, post_type) VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, PostModel>(&sql)
            .bind(new.business_id.into_inner())
            .bind(&new.content)
            .bind(&new.post_type)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Self::insert_media(&mut *conn, post.id, &new.media).await?;
        let media = Self::media_for(&mut *conn, &[post.id]).await?;

        Ok(with_media(post, false, media))
    }

    async fn update_in(
        conn: &mut PgConnection,
        id: PostId,
        update: &PostUpdate,
        viewer: UserId,
    ) -> RepoResult<PostWithMedia> {
        let sql = format!(
            "UPDATE posts SET content = $1, post_type = $2, updated_at = NOW() \
             WHERE id = $3 RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, PostModel>(&sql)
            .bind(&update.content)
            .bind(&update.post_type)
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| post_not_found(id))?;

        if !update.media_to_delete.is_empty() {
            let media_ids: Vec<i64> = update
                .media_to_delete
                .iter()
                .copied()
                .map(MediaId::into_inner)
                .collect();

            // Scoped to this post so foreign media ids are ignored
            sqlx::query("DELETE FROM post_media WHERE post_id = $1 AND id = ANY($2)")
                .bind(post.id)
                .bind(&media_ids)
                .execute(&mut *conn)
                .await
                .map_err(map_db_error)?;
        }

        Self::insert_media(&mut *conn, post.id, &update.new_media).await?;

        let liked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post.id)
        .bind(viewer.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let media = Self::media_for(&mut *conn, &[post.id]).await?;

        Ok(with_media(post, liked, media))
    }

    async fn delete_in(conn: &mut PgConnection, id: PostId) -> RepoResult<()> {
        lock_post(&mut *conn, id).await?;

        sqlx::query("DELETE FROM post_media WHERE post_id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list_by_business(
        &self,
        business_id: BusinessId,
        viewer: Option<UserId>,
    ) -> RepoResult<Vec<PostWithMedia>> {
        let rows = sqlx::query_as::<_, PostRowModel>(
            r#"
            SELECT
                p.id, p.business_id, p.content, p.post_type,
                p.likes_count, p.comments_count, p.shares_count,
                p.created_at, p.updated_at,
                EXISTS (
                    SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $2
                ) AS liked_by_user
            FROM posts p
            WHERE p.business_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(business_id.into_inner())
        .bind(viewer.map(UserId::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = rows.iter().map(|row| row.post.id).collect();
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let media = Self::media_for(&mut conn, &post_ids).await?;

        let posts = rows
            .into_iter()
            .map(|row| (row.post, row.liked_by_user))
            .collect();
        Ok(attach_media(posts, media))
    }

    #[instrument(skip(self, post), fields(business_id = %post.business_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<PostWithMedia> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::create_in(&mut tx, post).await;
        finish(tx, result).await
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: PostId,
        update: &PostUpdate,
        viewer: UserId,
    ) -> RepoResult<PostWithMedia> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::update_in(&mut tx, id, update, viewer).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let result = Self::delete_in(&mut tx, id).await;
        finish(tx, result).await
    }
}
