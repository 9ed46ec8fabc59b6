//! Like service
//!
//! Post and comment like toggles. Each toggle reports the ledger state the
//! repository read back inside its own transaction.

use feed_core::{CommentId, PostId, UserId};
use tracing::{info, instrument};

use crate::dto::{CommentLikeResponse, LikeCheckResponse, PostLikeResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the caller's like on a post
    #[instrument(skip(self))]
    pub async fn toggle_post_like(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> ServiceResult<PostLikeResponse> {
        let toggle = self.ctx.post_like_repo().toggle(post_id, user_id).await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            action = toggle.action.as_str(),
            likes_count = toggle.likes_count,
            "Post like toggled"
        );

        Ok(PostLikeResponse {
            success: true,
            action: toggle.action.as_str().to_string(),
            likes_count: toggle.likes_count,
        })
    }

    /// Whether `user_id` likes the post
    #[instrument(skip(self))]
    pub async fn check_post_like(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> ServiceResult<LikeCheckResponse> {
        let liked = self.ctx.post_like_repo().exists(post_id, user_id).await?;
        Ok(LikeCheckResponse {
            success: true,
            liked,
        })
    }

    /// Flip the caller's like on a comment
    #[instrument(skip(self))]
    pub async fn toggle_comment_like(
        &self,
        comment_id: CommentId,
        user_id: UserId,
    ) -> ServiceResult<CommentLikeResponse> {
        let toggle = self
            .ctx
            .comment_like_repo()
            .toggle(comment_id, user_id)
            .await?;

        info!(
            comment_id = %comment_id,
            user_id = %user_id,
            liked = toggle.liked,
            like_count = toggle.like_count,
            "Comment like toggled"
        );

        Ok(CommentLikeResponse {
            liked: toggle.liked,
            like_count: toggle.like_count,
        })
    }
}
