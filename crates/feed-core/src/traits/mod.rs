//! Repository ports implemented by the persistence layer

mod repositories;

pub use repositories::{
    BusinessRepository, CommentLikeRepository, CommentRepository, PostLikeRepository,
    PostRepository, RepoResult, ShareRepository,
};
