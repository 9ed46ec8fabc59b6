//! Response DTOs for API endpoints
//!
//! Envelopes use camelCase keys (`likesCount`, `commentsCount`). Records
//! inside them (posts, media, comments) keep their snake_case column names.

use chrono::{DateTime, Utc};
use feed_core::{BusinessId, CommentId, MediaId, PostId, ShareId, UserId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// Bare success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// Post Responses
// ============================================================================

/// Media attachment of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: MediaId,
    pub post_id: PostId,
    pub media_url: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Post with its media and the caller's like flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: PostId,
    pub business_id: BusinessId,
    pub content: String,
    pub post_type: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub media: Vec<MediaResponse>,
    pub liked_by_user: bool,
}

/// `GET /posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub success: bool,
    pub posts: Vec<PostResponse>,
}

/// `POST /posts` and `PUT /posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMutationResponse {
    pub success: bool,
    pub post_id: PostId,
    pub post: PostResponse,
}

// ============================================================================
// Like Responses
// ============================================================================

/// `POST /posts/like`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLikeResponse {
    pub success: bool,
    /// "added" or "removed"
    pub action: String,
    pub likes_count: i64,
}

/// `GET /posts/like/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCheckResponse {
    pub success: bool,
    pub liked: bool,
}

/// `POST /posts/comment/like`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A comment as seen by the caller, replies nested one level deep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_name: String,
    pub user_logo: String,
    pub likes_count: i64,
    pub liked_by_user: bool,
    pub reply_count: i64,
    pub replies: Vec<CommentResponse>,
}

/// `POST /posts/comment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    pub success: bool,
    pub comment: CommentResponse,
    pub comments_count: i64,
}

/// `GET /posts/comment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub success: bool,
    pub comments: Vec<CommentResponse>,
    /// Number of root comments
    pub count: usize,
    /// Replies across all returned roots
    pub total_replies: usize,
}

/// `DELETE /posts/comment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    pub success: bool,
    pub comments_count: i64,
}

/// `GET /posts/comment/replies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepliesResponse {
    pub success: bool,
    pub replies: Vec<CommentResponse>,
    pub count: usize,
}

// ============================================================================
// Share Responses
// ============================================================================

/// `POST /posts/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub success: bool,
    pub shares_count: i64,
}

/// One share event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEventResponse {
    pub id: ShareId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub shared_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `GET /posts/share`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareListResponse {
    pub success: bool,
    pub shares: Vec<ShareEventResponse>,
    pub count: usize,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
}

impl HealthResponse {
    pub fn healthy(uptime_secs: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            uptime_secs,
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
