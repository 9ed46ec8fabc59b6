//! Share handlers

use axum::{extract::State, Json};
use feed_service::{
    ShareListQuery, ShareListResponse, SharePostRequest, ShareResponse, ShareService,
};

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /posts/share
pub async fn share_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SharePostRequest>,
) -> ApiResult<Json<ShareResponse>> {
    let response = ShareService::new(state.service_context())
        .share_post(auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// GET /posts/share?postId=
pub async fn list_shares(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<ShareListQuery>,
) -> ApiResult<Json<ShareListResponse>> {
    let response = ShareService::new(state.service_context())
        .list_shares(query.post_id)
        .await?;
    Ok(Json(response))
}
