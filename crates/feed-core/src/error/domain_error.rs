//! Rule violations and lookup failures raised by the feed domain

use thiserror::Error;

use crate::value_objects::{BusinessId, CommentId, PostId};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    #[error("Business not found: {0}")]
    BusinessNotFound(BusinessId),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    /// Replies may only target a visible root comment of the same post
    #[error("Invalid parent comment")]
    InvalidParent,

    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Not business owner")]
    NotBusinessOwner,

    /// Storage failure; the message never reaches clients
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Stable code sent to clients in the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::BusinessNotFound(_) => "UNKNOWN_BUSINESS",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidParent => "INVALID_PARENT",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotBusinessOwner => "NOT_BUSINESS_OWNER",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::BusinessNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ContentTooLong { .. } | Self::InvalidParent)
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor | Self::NotBusinessOwner)
    }
}
