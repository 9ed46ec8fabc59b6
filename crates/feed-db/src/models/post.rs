//! Post and post media database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub business_id: i64,
    pub content: String,
    pub post_type: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row with the viewer's like flag (from listing query)
#[derive(Debug, Clone, FromRow)]
pub struct PostRowModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub liked_by_user: bool,
}

/// Database model for post_media table
#[derive(Debug, Clone, FromRow)]
pub struct PostMediaModel {
    pub id: i64,
    pub post_id: i64,
    pub media_url: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
}
