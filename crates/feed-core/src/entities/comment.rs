//! Comment entity - comments and single-level replies on a post

use chrono::{DateTime, Utc};

use super::business::Author;
use crate::value_objects::{CommentId, PostId, UserId};

/// Comment entity
///
/// A comment with a `parent_id` is a reply. Replies are never parents.
/// `deleted_at` marks a soft-deleted comment; the row is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Maximum content length in characters
    pub const MAX_CONTENT_LENGTH: usize = 2000;

    /// Check if comment is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if comment is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the given user wrote this comment
    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether a new reply may hang off this comment
    pub fn accepts_replies_on(&self, post_id: PostId) -> bool {
        !self.is_deleted() && !self.is_reply() && self.post_id == post_id
    }
}

/// Values for inserting a new comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub parent_id: Option<CommentId>,
}

/// A comment as shown to a particular viewer
///
/// Like counts and the viewer's like flag are computed per request from the
/// `comment_likes` ledger and never stored on the comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Author,
    pub likes_count: i64,
    pub liked_by_user: bool,
    pub reply_count: i64,
    pub replies: Vec<CommentView>,
}

impl CommentView {
    /// Attach replies, keeping `reply_count` in step with what is attached
    pub fn with_replies(mut self, replies: Vec<CommentView>) -> Self {
        self.reply_count = replies.len() as i64;
        self.replies = replies;
        self
    }
}
