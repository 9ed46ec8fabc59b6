//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in feed-core.

mod business;
mod comment;
mod comment_like;
mod error;
mod post;
mod post_like;
mod share;

pub use business::PgBusinessRepository;
pub use comment::PgCommentRepository;
pub use comment_like::PgCommentLikeRepository;
pub use post::PgPostRepository;
pub use post_like::PgPostLikeRepository;
pub use share::PgShareRepository;
