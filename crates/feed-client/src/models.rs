//! Wire models as returned by the feed API
//!
//! Envelope keys are camelCase; post and comment records are snake_case.

use chrono::{DateTime, Utc};
use feed_core::{BusinessId, CommentId, MediaId, PostId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: MediaId,
    pub post_id: PostId,
    pub media_url: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Post as the viewer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub business_id: BusinessId,
    pub content: String,
    pub post_type: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub media: Vec<MediaRecord>,
    #[serde(default)]
    pub liked_by_user: bool,
}

/// Comment with its replies, one level deep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
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
    #[serde(default)]
    pub replies: Vec<CommentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostListResponse {
    pub posts: Vec<PostRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLikeResponse {
    /// "added" or "removed"
    pub action: String,
    pub likes_count: i64,
}

impl PostLikeResponse {
    pub fn liked(&self) -> bool {
        self.action == "added"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LikeCheckResponse {
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    pub comment: CommentRecord,
    pub comments_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<CommentRecord>,
    pub count: usize,
    pub total_replies: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    pub comments_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub shares_count: i64,
}

/// `{ success: false, error, code, details? }`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_listing_decodes_nested_replies() {
        let body = r#"{
            "success": true,
            "count": 1,
            "totalReplies": 1,
            "comments": [{
                "id": 10, "post_id": 3, "user_id": 2, "content": "root",
                "parent_id": null,
                "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z",
                "user_name": "Cafe", "user_logo": "/logo.png",
                "likes_count": 0, "liked_by_user": false, "reply_count": 1,
                "replies": [{
                    "id": 11, "post_id": 3, "user_id": 4, "content": "reply",
                    "parent_id": 10,
                    "created_at": "2024-05-01T11:00:00Z", "updated_at": "2024-05-01T11:00:00Z",
                    "user_name": "", "user_logo": "",
                    "likes_count": 2, "liked_by_user": true, "reply_count": 0,
                    "replies": []
                }]
            }]
        }"#;

        let listing: CommentListResponse = serde_json::from_str(body).unwrap();

        assert_eq!(listing.total_replies, 1);
        let root = &listing.comments[0];
        assert_eq!(root.id, CommentId::new(10));
        assert_eq!(root.replies[0].parent_id, Some(CommentId::new(10)));
        assert!(root.replies[0].liked_by_user);
    }

    #[test]
    fn test_like_action() {
        let added: PostLikeResponse =
            serde_json::from_str(r#"{"success":true,"action":"added","likesCount":1}"#).unwrap();
        let removed: PostLikeResponse =
            serde_json::from_str(r#"{"success":true,"action":"removed","likesCount":0}"#).unwrap();

        assert!(added.liked());
        assert!(!removed.liked());
        assert_eq!(added.likes_count, 1);
    }
}
