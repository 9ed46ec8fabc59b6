//! Like handlers for posts and comments

use axum::{extract::State, Json};
use feed_service::{
    CommentLikeResponse, LikeCheckQuery, LikeCheckResponse, LikeService, PostLikeResponse,
    ToggleCommentLikeRequest, TogglePostLikeRequest,
};

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /posts/like
pub async fn toggle_post_like(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<TogglePostLikeRequest>,
) -> ApiResult<Json<PostLikeResponse>> {
    let response = LikeService::new(state.service_context())
        .toggle_post_like(request.post_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// GET /posts/like/check?postId=&userId=
///
/// Signed-in callers only; `userId` falls back to the caller.
pub async fn check_post_like(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<LikeCheckQuery>,
) -> ApiResult<Json<LikeCheckResponse>> {
    let user_id = query.user_id.unwrap_or(auth.user_id);

    let response = LikeService::new(state.service_context())
        .check_post_like(query.post_id, user_id)
        .await?;
    Ok(Json(response))
}

/// POST /posts/comment/like
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ToggleCommentLikeRequest>,
) -> ApiResult<Json<CommentLikeResponse>> {
    let response = LikeService::new(state.service_context())
        .toggle_comment_like(request.comment_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
