//! # feed-client
//!
//! Client side of the business feed. [`FeedState`] holds the posts and
//! comment threads a user is looking at, applies likes, comments and shares
//! optimistically, then replaces the guess with what the server reports or
//! rolls it back when the call fails.

pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod state;

pub use api::{FeedApi, HttpFeedApi};
pub use cache::ResponseCache;
pub use error::{ClientError, ClientResult};
pub use models::{
    CommentLikeResponse, CommentListResponse, CommentRecord, CreateCommentResponse,
    DeleteCommentResponse, MediaRecord, PostLikeResponse, PostRecord, ShareResponse,
};
pub use state::{
    CommentKey, CommentNode, FeedState, PendingComment, PendingCommentDelete, PendingCommentLike,
    PendingPostLike, PendingShare, Viewer,
};
