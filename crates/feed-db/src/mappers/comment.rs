//! Comment model -> entity mappers

use feed_core::entities::{Author, Comment, CommentView};
use feed_core::value_objects::{CommentId, PostId, UserId};

use crate::models::{CommentModel, CommentViewModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            post_id: PostId::new(model.post_id),
            user_id: UserId::new(model.user_id),
            content: model.content,
            parent_id: model.parent_id.map(CommentId::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

impl From<CommentViewModel> for CommentView {
    fn from(model: CommentViewModel) -> Self {
        CommentView {
            comment: Comment::from(model.comment),
            author: Author::new(model.user_name, model.user_logo),
            likes_count: model.likes_count,
            liked_by_user: model.liked_by_user,
            reply_count: model.reply_count,
            replies: Vec::new(),
        }
    }
}
