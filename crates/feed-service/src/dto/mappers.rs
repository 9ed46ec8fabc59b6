//! Conversions from domain entities to response DTOs

use feed_core::{CommentView, PostMedia, PostWithMedia, Share};

use super::responses::{CommentResponse, MediaResponse, PostResponse, ShareEventResponse};

impl From<PostMedia> for MediaResponse {
    fn from(media: PostMedia) -> Self {
        Self {
            id: media.id,
            post_id: media.post_id,
            media_url: media.media_url,
            media_type: media.media_type,
            uploaded_at: media.uploaded_at,
        }
    }
}

impl From<PostWithMedia> for PostResponse {
    fn from(entry: PostWithMedia) -> Self {
        let PostWithMedia {
            post,
            media,
            liked_by_user,
        } = entry;

        Self {
            id: post.id,
            business_id: post.business_id,
            content: post.content,
            post_type: post.post_type,
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            shares_count: post.shares_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            media: media.into_iter().map(MediaResponse::from).collect(),
            liked_by_user,
        }
    }
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        let CommentView {
            comment,
            author,
            likes_count,
            liked_by_user,
            reply_count,
            replies,
        } = view;

        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            parent_id: comment.parent_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user_name: author.name,
            user_logo: author.logo,
            likes_count,
            liked_by_user,
            reply_count,
            replies: replies.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

impl From<Share> for ShareEventResponse {
    fn from(share: Share) -> Self {
        Self {
            id: share.id,
            post_id: share.post_id,
            user_id: share.user_id,
            shared_to: share.shared_to,
            created_at: share.created_at,
        }
    }
}
