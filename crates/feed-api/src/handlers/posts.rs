//! Post handlers
//!
//! The feed listing is public; writes are limited to the business owner.

use axum::{extract::State, Json};
use feed_service::{
    CreatePostRequest, DeletePostQuery, ListPostsQuery, PostListResponse, PostMutationResponse,
    PostService, SuccessResponse, UpdatePostRequest,
};

use crate::extractors::{AuthUser, OptionalAuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /posts?businessId=
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    QueryParams(query): QueryParams<ListPostsQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let posts = PostService::new(state.service_context())
        .list_posts(query.business_id, viewer.user_id())
        .await?;

    Ok(Json(PostListResponse {
        success: true,
        posts,
    }))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<PostMutationResponse>> {
    let response = PostService::new(state.service_context())
        .create_post(auth.user_id, request)
        .await?;
    Ok(Created(response))
}

/// PUT /posts
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostMutationResponse>> {
    let response = PostService::new(state.service_context())
        .update_post(auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /posts?postId=
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<DeletePostQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let response = PostService::new(state.service_context())
        .delete_post(auth.user_id, query.post_id)
        .await?;
    Ok(Json(response))
}
