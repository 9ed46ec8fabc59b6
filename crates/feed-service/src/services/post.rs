//! Post service
//!
//! Feed listing and owner-only post create/update/delete.

use feed_core::{
    Business, BusinessId, DomainError, NewMedia, NewPost, Post, PostId, PostUpdate, UserId,
};
use tracing::{info, instrument};

use crate::dto::{
    CreatePostRequest, MediaInput, PostMutationResponse, PostResponse, SuccessResponse,
    UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Posts of a business, newest first
    ///
    /// Anonymous viewers see `liked_by_user = false` everywhere.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        business_id: BusinessId,
        viewer: Option<UserId>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .list_by_business(business_id, viewer)
            .await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// Create a post for a business the caller owns
    #[instrument(skip(self, request), fields(business_id = %request.business_id))]
    pub async fn create_post(
        &self,
        user_id: UserId,
        request: CreatePostRequest,
    ) -> ServiceResult<PostMutationResponse> {
        self.require_owner(request.business_id, user_id).await?;

        let new_post = NewPost {
            business_id: request.business_id,
            content: normalize_content(&request.content)?,
            post_type: post_type_or_default(request.post_type),
            media: into_new_media(request.media),
        };

        let created = self.ctx.post_repo().create(&new_post).await?;
        let post_id = created.post.id;

        info!(post_id = %post_id, user_id = %user_id, "Post published");

        Ok(PostMutationResponse {
            success: true,
            post_id,
            post: PostResponse::from(created),
        })
    }

    /// Edit a post: content, type, and media added or removed
    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    pub async fn update_post(
        &self,
        user_id: UserId,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostMutationResponse> {
        let post = self.get_post(request.post_id).await?;
        self.require_owner(post.business_id, user_id).await?;

        let update = PostUpdate {
            content: normalize_content(&request.content)?,
            post_type: request
                .post_type
                .map_or_else(|| post.post_type.clone(), |t| post_type_or_default(Some(t))),
            media_to_delete: request.media_to_delete,
            new_media: into_new_media(request.media),
        };

        let updated = self.ctx.post_repo().update(post.id, &update, user_id).await?;
        info!(
            post_id = %post.id,
            removed_media = update.media_to_delete.len(),
            added_media = update.new_media.len(),
            "Post edited"
        );

        Ok(PostMutationResponse {
            success: true,
            post_id: post.id,
            post: PostResponse::from(updated),
        })
    }

    /// Delete a post; its media, comments, likes and shares go with it
    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: UserId, post_id: PostId) -> ServiceResult<SuccessResponse> {
        let post = self.get_post(post_id).await?;
        self.require_owner(post.business_id, user_id).await?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, user_id = %user_id, "Post removed by owner");
        Ok(SuccessResponse::ok())
    }

    async fn get_post(&self, post_id: PostId) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn require_owner(&self, business_id: BusinessId, user_id: UserId) -> ServiceResult<Business> {
        let business = self
            .ctx
            .business_repo()
            .find_by_id(business_id)
            .await?
            .ok_or(DomainError::BusinessNotFound(business_id))?;

        if !business.is_owned_by(user_id) {
            return Err(ServiceError::Domain(DomainError::NotBusinessOwner));
        }
        Ok(business)
    }
}

/// Trim post content and enforce its bounds
fn normalize_content(content: &str) -> ServiceResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Content is required"));
    }
    if content.chars().count() > Post::MAX_CONTENT_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: Post::MAX_CONTENT_LENGTH,
        }
        .into());
    }
    Ok(content.to_string())
}

fn post_type_or_default(post_type: Option<String>) -> String {
    post_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| Post::DEFAULT_TYPE.to_string())
}

fn into_new_media(media: Vec<MediaInput>) -> Vec<NewMedia> {
    media
        .into_iter()
        .map(|m| NewMedia {
            media_url: m.media_url,
            media_type: m.media_type,
        })
        .collect()
}
