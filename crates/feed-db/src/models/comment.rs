//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CommentModel {
    /// Check if comment is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Comment joined with author display fields and like aggregates
#[derive(Debug, Clone, FromRow)]
pub struct CommentViewModel {
    #[sqlx(flatten)]
    pub comment: CommentModel,
    pub user_name: String,
    pub user_logo: String,
    pub likes_count: i64,
    pub liked_by_user: bool,
    pub reply_count: i64,
}
