//! Post entity - a business's feed entry with denormalized engagement counters

use chrono::{DateTime, Utc};

use crate::value_objects::{BusinessId, MediaId, PostId};

/// Post entity
///
/// `likes_count`, `comments_count` and `shares_count` are caches of the
/// ledger tables. They are only ever written by recomputing `COUNT(*)`
/// inside the transaction that changed the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub business_id: BusinessId,
    pub content: String,
    pub post_type: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub shares_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Post type used when the caller does not pick one
    pub const DEFAULT_TYPE: &'static str = "text";

    /// Maximum content length in characters
    pub const MAX_CONTENT_LENGTH: usize = 5000;

    /// Check if the post has been edited since creation
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Media attachment owned by a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMedia {
    pub id: MediaId,
    pub post_id: PostId,
    pub media_url: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl PostMedia {
    /// Check if attachment is an image
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image")
    }

    /// Check if attachment is a video
    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video")
    }
}

/// Post together with its media and the caller's like flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithMedia {
    pub post: Post,
    pub media: Vec<PostMedia>,
    pub liked_by_user: bool,
}

/// Values for inserting a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub business_id: BusinessId,
    pub content: String,
    pub post_type: String,
    pub media: Vec<NewMedia>,
}

/// Values for inserting a media row (the file is already uploaded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub media_url: String,
    pub media_type: String,
}

/// Edit applied to an existing post in one transaction
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub content: String,
    pub post_type: String,
    pub media_to_delete: Vec<MediaId>,
    pub new_media: Vec<NewMedia>,
}
