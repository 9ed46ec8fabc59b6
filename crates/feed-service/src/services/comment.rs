//! Comment service
//!
//! Creates, soft-deletes and lists comments. Threads are one level deep:
//! root comments are fetched first, then each root's replies.

use feed_core::{Comment, CommentId, CommentView, DomainError, NewComment, PostId, UserId};
use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, CreateCommentResponse,
    DeleteCommentResponse, RepliesResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment, or a reply when `parent_id` is set
    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    pub async fn create_comment(
        &self,
        user_id: UserId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CreateCommentResponse> {
        let new_comment = NewComment {
            post_id: request.post_id,
            user_id,
            content: normalize_content(&request.content)?,
            parent_id: request.parent_id,
        };

        let (view, comments_count) = self.ctx.comment_repo().create(&new_comment).await?;

        info!(
            comment_id = %view.comment.id,
            user_id = %user_id,
            is_reply = view.comment.is_reply(),
            "Comment posted"
        );

        Ok(CreateCommentResponse {
            success: true,
            comment: CommentResponse::from(view),
            comments_count,
        })
    }

    /// Soft-delete one of the caller's comments
    ///
    /// Replies under a deleted root are left alone.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        user_id: UserId,
        comment_id: CommentId,
    ) -> ServiceResult<DeleteCommentResponse> {
        let comments_count = self
            .ctx
            .comment_repo()
            .soft_delete(comment_id, user_id)
            .await?;
        info!(comment_id = %comment_id, comments_count, "Comment soft-deleted");

        Ok(DeleteCommentResponse {
            success: true,
            comments_count,
        })
    }

    /// Visible root comments of a post, newest first, each with its replies
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: PostId,
        viewer: UserId,
    ) -> ServiceResult<CommentListResponse> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let roots = self.ctx.comment_repo().list_roots(post_id, viewer).await?;
        let replies = try_join_all(
            roots
                .iter()
                .map(|root| self.ctx.comment_repo().list_replies(root.comment.id, viewer)),
        )
        .await?;

        let threads: Vec<CommentView> = roots
            .into_iter()
            .zip(replies)
            .map(|(root, replies)| root.with_replies(replies))
            .collect();
        let total_replies = threads.iter().map(|t| t.replies.len()).sum();

        Ok(CommentListResponse {
            success: true,
            count: threads.len(),
            total_replies,
            comments: threads.into_iter().map(CommentResponse::from).collect(),
        })
    }

    /// Visible replies of one comment, oldest first
    ///
    /// Works for a soft-deleted parent too, so its replies stay reachable.
    #[instrument(skip(self))]
    pub async fn list_replies(
        &self,
        comment_id: CommentId,
        viewer: UserId,
    ) -> ServiceResult<RepliesResponse> {
        if self.ctx.comment_repo().find_by_id(comment_id).await?.is_none() {
            return Err(ServiceError::not_found("Comment", comment_id));
        }

        let replies = self
            .ctx
            .comment_repo()
            .list_replies(comment_id, viewer)
            .await?;

        Ok(RepliesResponse {
            success: true,
            count: replies.len(),
            replies: replies.into_iter().map(CommentResponse::from).collect(),
        })
    }
}

fn normalize_content(content: &str) -> ServiceResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Content is required"));
    }
    if content.chars().count() > Comment::MAX_CONTENT_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: Comment::MAX_CONTENT_LENGTH,
        }
        .into());
    }
    Ok(content.to_string())
}
