//! Post model -> entity mappers

use std::collections::HashMap;

use feed_core::entities::{Post, PostMedia, PostWithMedia};
use feed_core::value_objects::{BusinessId, MediaId, PostId};

use crate::models::{PostMediaModel, PostModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            business_id: BusinessId::new(model.business_id),
            content: model.content,
            post_type: model.post_type,
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            shares_count: model.shares_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PostMediaModel> for PostMedia {
    fn from(model: PostMediaModel) -> Self {
        PostMedia {
            id: MediaId::new(model.id),
            post_id: PostId::new(model.post_id),
            media_url: model.media_url,
            media_type: model.media_type,
            uploaded_at: model.uploaded_at,
        }
    }
}

/// Pair each post with its media rows, keeping the order of `posts`
///
/// `posts` carries the viewer's like flag for each post.
pub fn attach_media(
    posts: Vec<(PostModel, bool)>,
    media: Vec<PostMediaModel>,
) -> Vec<PostWithMedia> {
    let mut by_post: HashMap<i64, Vec<PostMedia>> = HashMap::new();
    for row in media {
        by_post.entry(row.post_id).or_default().push(PostMedia::from(row));
    }

    posts
        .into_iter()
        .map(|(post, liked_by_user)| PostWithMedia {
            media: by_post.remove(&post.id).unwrap_or_default(),
            post: Post::from(post),
            liked_by_user,
        })
        .collect()
}

/// Build a single post aggregate from rows that all belong to it
pub fn with_media(
    post: PostModel,
    liked_by_user: bool,
    media: Vec<PostMediaModel>,
) -> PostWithMedia {
    PostWithMedia {
        post: Post::from(post),
        media: media.into_iter().map(PostMedia::from).collect(),
        liked_by_user,
    }
}
