//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for one request and
//! turns repository results into response DTOs.

pub mod comment;
pub mod context;
pub mod error;
pub mod like;
pub mod post;
pub mod share;

#[cfg(test)]
pub(crate) mod testing;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use like::LikeService;
pub use post::PostService;
pub use share::ShareService;
