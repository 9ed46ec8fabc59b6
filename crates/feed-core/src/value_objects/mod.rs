//! Value objects - immutable types that represent domain concepts

mod ids;

pub use ids::{BusinessId, CommentId, IdParseError, MediaId, PostId, ShareId, UserId};
