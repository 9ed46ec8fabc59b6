//! Share database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for shares table
#[derive(Debug, Clone, FromRow)]
pub struct ShareModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub shared_to: Option<String>,
    pub created_at: DateTime<Utc>,
}
