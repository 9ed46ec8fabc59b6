//! # feed-service
//!
//! Application layer: request/response DTOs and the services behind the
//! post, like, comment and share endpoints.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    CommentService, LikeService, PostService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ShareService,
};
