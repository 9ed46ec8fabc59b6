//! Domain entities - core business objects

mod business;
mod comment;
mod engagement;
mod post;

pub use business::{Author, Business};
pub use comment::{Comment, CommentView, NewComment};
pub use engagement::{CommentLikeToggle, LikeAction, PostLikeToggle, Share};
pub use post::{NewMedia, NewPost, Post, PostMedia, PostUpdate, PostWithMedia};
