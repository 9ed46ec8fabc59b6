//! Client error types

use feed_core::{CommentId, PostId};
use thiserror::Error;

/// Errors surfaced to the caller of the feed client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope
    #[error("{message} ({status} {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cache file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Post {0} is not loaded")]
    UnknownPost(PostId),

    #[error("Comment {0} is not loaded")]
    UnknownComment(CommentId),

    #[error("Content is required")]
    EmptyContent,
}

impl ClientError {
    /// HTTP status when the server rejected the call
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server error code, e.g. `UNKNOWN_POST`
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
