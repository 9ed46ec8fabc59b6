//! Business database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for businesses table
#[derive(Debug, Clone, FromRow)]
pub struct BusinessModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}
