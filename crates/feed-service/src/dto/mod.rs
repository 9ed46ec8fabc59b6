//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Conversions from domain entities to response DTOs

mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommentQuery, CreateCommentRequest, CreatePostRequest, DeleteCommentQuery, DeletePostQuery,
    LikeCheckQuery, ListPostsQuery, MediaInput, RepliesQuery, ShareListQuery, SharePostRequest,
    ToggleCommentLikeRequest, TogglePostLikeRequest, UpdatePostRequest,
};

pub use responses::{
    CommentLikeResponse, CommentListResponse, CommentResponse, CreateCommentResponse,
    DeleteCommentResponse, HealthChecks, HealthResponse, LikeCheckResponse, MediaResponse,
    PostLikeResponse, PostListResponse, PostMutationResponse, PostResponse, ReadinessResponse,
    RepliesResponse, ShareEventResponse, ShareListResponse, ShareResponse, SuccessResponse,
};
