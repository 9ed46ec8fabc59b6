//! # feed-core
//!
//! Domain layer for the business feed: posts, comments and the like/share ledgers.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Author, Business, Comment, CommentLikeToggle, CommentView, LikeAction, NewComment,
    NewMedia, NewPost, Post, PostLikeToggle, PostMedia, PostUpdate, PostWithMedia, Share,
};
pub use error::DomainError;
pub use traits::{
    BusinessRepository, CommentLikeRepository, CommentRepository, PostLikeRepository,
    PostRepository, RepoResult, ShareRepository,
};
pub use value_objects::{BusinessId, CommentId, IdParseError, MediaId, PostId, ShareId, UserId};
