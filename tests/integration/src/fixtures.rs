//! Test fixtures
//!
//! Users and businesses have no API of their own here, so they are
//! inserted directly. Counter checks read the ledger tables the same way.

use anyhow::Result;
use feed_core::{BusinessId, PostId, UserId};
use sqlx::PgPool;

use crate::helpers::TestServer;

/// Insert a user with a unique email and username
pub async fn create_user(pool: &PgPool) -> Result<UserId> {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, username) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("{tag}@example.com"))
    .bind(format!("user_{tag}"))
    .fetch_one(pool)
    .await?;
    Ok(UserId::new(id))
}

/// Insert a business owned by `owner`
pub async fn create_business(pool: &PgPool, owner: UserId, name: &str) -> Result<BusinessId> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO businesses (owner_id, name, logo) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(owner.into_inner())
    .bind(name)
    .bind(format!("/uploads/{name}.png"))
    .fetch_one(pool)
    .await?;
    Ok(BusinessId::new(id))
}

/// Insert a bare text post
pub async fn create_post(pool: &PgPool, business: BusinessId) -> Result<PostId> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts (business_id, content) VALUES ($1, $2) RETURNING id",
    )
    .bind(business.into_inner())
    .bind("Fresh bread today")
    .fetch_one(pool)
    .await?;
    Ok(PostId::new(id))
}

/// A business owner with one post, plus tokens ready to use
pub struct SeededFeed {
    pub owner: UserId,
    pub owner_token: String,
    pub business: BusinessId,
    pub post: PostId,
}

impl SeededFeed {
    pub async fn create(server: &TestServer) -> Result<Self> {
        let owner = create_user(&server.pool).await?;
        let business = create_business(&server.pool, owner, "Bakery").await?;
        let post = create_post(&server.pool, business).await?;
        Ok(Self {
            owner,
            owner_token: server.token_for(owner)?,
            business,
            post,
        })
    }
}

/// A user who can act on the feed, with their token
pub async fn create_member(server: &TestServer) -> Result<(UserId, String)> {
    let user = create_user(&server.pool).await?;
    Ok((user, server.token_for(user)?))
}

/// Stored `(likes_count, comments_count, shares_count)` of a post
pub async fn post_counters(pool: &PgPool, post: PostId) -> Result<(i64, i64, i64)> {
    Ok(sqlx::query_as(
        "SELECT likes_count, comments_count, shares_count FROM posts WHERE id = $1",
    )
    .bind(post.into_inner())
    .fetch_one(pool)
    .await?)
}

/// Rows in the post like ledger
pub async fn like_rows(pool: &PgPool, post: PostId) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post.into_inner())
        .fetch_one(pool)
        .await?)
}

/// Comments of a post that are not soft-deleted
pub async fn visible_comment_rows(pool: &PgPool, post: PostId) -> Result<i64> {
    Ok(sqlx::query_scalar(
        "SELECT COUNT(*) FROM comments WHERE post_id = $1 AND deleted_at IS NULL",
    )
    .bind(post.into_inner())
    .fetch_one(pool)
    .await?)
}

/// Rows in the share ledger
pub async fn share_rows(pool: &PgPool, post: PostId) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM shares WHERE post_id = $1")
        .bind(post.into_inner())
        .fetch_one(pool)
        .await?)
}
