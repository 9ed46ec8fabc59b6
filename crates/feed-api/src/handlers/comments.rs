//! Comment handlers

use axum::{extract::State, Json};
use feed_service::{
    CommentListResponse, CommentQuery, CommentService, CreateCommentRequest,
    CreateCommentResponse, DeleteCommentQuery, DeleteCommentResponse, RepliesQuery,
    RepliesResponse,
};

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /posts/comment
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CreateCommentResponse>> {
    let response = CommentService::new(state.service_context())
        .create_comment(auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// GET /posts/comment?postId=
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<CommentQuery>,
) -> ApiResult<Json<CommentListResponse>> {
    let response = CommentService::new(state.service_context())
        .list_comments(query.post_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// DELETE /posts/comment?commentId=
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<DeleteCommentQuery>,
) -> ApiResult<Json<DeleteCommentResponse>> {
    let response = CommentService::new(state.service_context())
        .delete_comment(auth.user_id, query.comment_id)
        .await?;
    Ok(Json(response))
}

/// GET /posts/comment/replies?commentId=
pub async fn list_replies(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<RepliesQuery>,
) -> ApiResult<Json<RepliesResponse>> {
    let response = CommentService::new(state.service_context())
        .list_replies(query.comment_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
