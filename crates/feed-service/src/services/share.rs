//! Share service
//!
//! Shares are an append-only event log: every call adds a row, nothing is
//! deduplicated.

use feed_core::{DomainError, PostId, UserId};
use tracing::{info, instrument};

use crate::dto::{ShareEventResponse, ShareListResponse, SharePostRequest, ShareResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Share service
pub struct ShareService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShareService<'a> {
    /// Create a new ShareService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a share and return the post's new `shares_count`
    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    pub async fn share_post(
        &self,
        user_id: UserId,
        request: SharePostRequest,
    ) -> ServiceResult<ShareResponse> {
        let shared_to = request
            .shared_to
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty());

        let shares_count = self
            .ctx
            .share_repo()
            .record(request.post_id, user_id, shared_to)
            .await?;
        info!(post_id = %request.post_id, user_id = %user_id, shares_count, "Post shared");

        Ok(ShareResponse {
            success: true,
            shares_count,
        })
    }

    /// Share events of a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_shares(&self, post_id: PostId) -> ServiceResult<ShareListResponse> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let shares = self.ctx.share_repo().list_for_post(post_id).await?;

        Ok(ShareListResponse {
            success: true,
            count: shares.len(),
            shares: shares.into_iter().map(ShareEventResponse::from).collect(),
        })
    }
}
