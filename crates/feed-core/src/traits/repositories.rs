//! Repository traits (ports) - define the interface for data access
//!
//! Every method that changes a ledger also recomputes the matching counter and
//! does both inside one transaction. Implementations must never hand back a
//! count read outside the transaction that wrote it.

use async_trait::async_trait;

use crate::entities::{
    Business, Comment, CommentLikeToggle, CommentView, NewComment, NewPost, Post,
    PostLikeToggle, PostUpdate, PostWithMedia, Share,
};
use crate::error::DomainError;
use crate::value_objects::{BusinessId, CommentId, PostId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Business Repository
// ============================================================================

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Find business by ID
    async fn find_by_id(&self, id: BusinessId) -> RepoResult<Option<Business>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List a business's posts newest first, with media and the viewer's like flag
    async fn list_by_business(
        &self,
        business_id: BusinessId,
        viewer: Option<UserId>,
    ) -> RepoResult<Vec<PostWithMedia>>;

    /// Insert a post and its media rows
    async fn create(&self, post: &NewPost) -> RepoResult<PostWithMedia>;

    /// Apply an edit: content, type, removed media and added media
    ///
    /// `viewer` resolves the returned like flag. Returns `PostNotFound` if the
    /// post does not exist.
    async fn update(
        &self,
        id: PostId,
        update: &PostUpdate,
        viewer: UserId,
    ) -> RepoResult<PostWithMedia>;

    /// Delete a post, its media rows first
    ///
    /// Returns `PostNotFound` if the post does not exist.
    async fn delete(&self, id: PostId) -> RepoResult<()>;
}

// ============================================================================
// Post Like Ledger
// ============================================================================

#[async_trait]
pub trait PostLikeRepository: Send + Sync {
    /// Remove the like if present, add it otherwise, then recompute `likes_count`
    ///
    /// Returns `PostNotFound` if the post does not exist.
    async fn toggle(&self, post_id: PostId, user_id: UserId) -> RepoResult<PostLikeToggle>;

    /// Check whether a user likes a post
    async fn exists(&self, post_id: PostId, user_id: UserId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Like Ledger
// ============================================================================

#[async_trait]
pub trait CommentLikeRepository: Send + Sync {
    /// Remove the like if present, add it otherwise, then count the ledger
    ///
    /// Returns `CommentNotFound` if the comment does not exist or is deleted.
    async fn toggle(&self, comment_id: CommentId, user_id: UserId)
        -> RepoResult<CommentLikeToggle>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID, including soft-deleted rows
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// Insert a comment, recompute the post's `comments_count` and return the
    /// new comment as seen by its author together with the new count
    ///
    /// Errors: `PostNotFound`, `CommentNotFound` for an unknown parent,
    /// `InvalidParent` for a parent that is deleted, a reply, or on another post.
    async fn create(&self, comment: &NewComment) -> RepoResult<(CommentView, i64)>;

    /// Soft-delete a comment and recompute the post's `comments_count`
    ///
    /// Errors: `CommentNotFound` if missing or already deleted,
    /// `NotCommentAuthor` if `actor` did not write it.
    async fn soft_delete(&self, id: CommentId, actor: UserId) -> RepoResult<i64>;

    /// Visible root comments of a post, newest first, without replies attached
    async fn list_roots(&self, post_id: PostId, viewer: UserId) -> RepoResult<Vec<CommentView>>;

    /// Visible replies of a comment, oldest first
    async fn list_replies(
        &self,
        parent_id: CommentId,
        viewer: UserId,
    ) -> RepoResult<Vec<CommentView>>;
}

// ============================================================================
// Share Ledger
// ============================================================================

#[async_trait]
pub trait ShareRepository: Send + Sync {
    /// Append a share event and return the recomputed `shares_count`
    ///
    /// Returns `PostNotFound` if the post does not exist.
    async fn record(
        &self,
        post_id: PostId,
        user_id: UserId,
        shared_to: Option<&str>,
    ) -> RepoResult<i64>;

    /// Share events of a post, oldest first
    async fn list_for_post(&self, post_id: PostId) -> RepoResult<Vec<Share>>;
}
