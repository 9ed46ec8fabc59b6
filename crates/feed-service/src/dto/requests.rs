//! Request DTOs for API endpoints
//!
//! Bodies and query strings use camelCase keys. Ids accept either a JSON
//! number or a numeric string.

use feed_core::{BusinessId, CommentId, MediaId, PostId, UserId};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Query for a business's post feed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub business_id: BusinessId,
}

/// Media attachment that has already been uploaded
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MediaInput {
    #[validate(length(min = 1, max = 2048, message = "Media URL must be 1-2048 characters"))]
    pub media_url: String,

    #[validate(length(min = 1, max = 50, message = "Media type must be 1-50 characters"))]
    pub media_type: String,
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub business_id: BusinessId,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "Post type must be 1-50 characters"))]
    pub post_type: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub media: Vec<MediaInput>,
}

/// Update post request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_id: PostId,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "Post type must be 1-50 characters"))]
    pub post_type: Option<String>,

    /// Media rows of this post to remove
    #[serde(default)]
    pub media_to_delete: Vec<MediaId>,

    /// Media rows to add
    #[serde(default)]
    #[validate(nested)]
    pub media: Vec<MediaInput>,
}

/// Query identifying a post to delete
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostQuery {
    pub post_id: PostId,
}

// ============================================================================
// Like Requests
// ============================================================================

/// Toggle the caller's like on a post
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TogglePostLikeRequest {
    pub post_id: PostId,
}

/// Check whether a user likes a post; the user defaults to the caller
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCheckQuery {
    pub post_id: PostId,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Toggle the caller's like on a comment
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCommentLikeRequest {
    pub comment_id: CommentId,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment or reply request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: PostId,

    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,

    /// Root comment this is a reply to
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

/// Query for a post's comment thread
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    pub post_id: PostId,
}

/// Query identifying a comment to soft-delete
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentQuery {
    pub comment_id: CommentId,
}

/// Query for the replies of one comment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepliesQuery {
    pub comment_id: CommentId,
}

// ============================================================================
// Share Requests
// ============================================================================

/// Record a share event
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SharePostRequest {
    pub post_id: PostId,

    /// Destination label such as "facebook" or "email"
    #[validate(length(min = 1, max = 100, message = "Share destination must be 1-100 characters"))]
    pub shared_to: Option<String>,
}

/// Query for the share events of a post
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareListQuery {
    pub post_id: PostId,
}
