//! Engagement ledgers - likes on posts and comments, share events

use chrono::{DateTime, Utc};

use crate::value_objects::{PostId, ShareId, UserId};

/// What a like toggle did to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Added,
    Removed,
}

impl LikeAction {
    /// Wire name of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }

    /// Whether the user likes the target after this action
    #[inline]
    pub fn is_liked(self) -> bool {
        matches!(self, Self::Added)
    }

    /// Action for a toggle given whether a ledger row already existed
    #[inline]
    pub fn from_existing(existed: bool) -> Self {
        if existed {
            Self::Removed
        } else {
            Self::Added
        }
    }
}

/// Result of toggling a post like, read back inside the same transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostLikeToggle {
    pub action: LikeAction,
    pub likes_count: i64,
}

/// Result of toggling a comment like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLikeToggle {
    pub liked: bool,
    pub like_count: i64,
}

/// Share event (append-only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub id: ShareId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub shared_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_action_from_existing() {
        assert_eq!(LikeAction::from_existing(true), LikeAction::Removed);
        assert_eq!(LikeAction::from_existing(false), LikeAction::Added);
    }

    #[test]
    fn test_like_action_wire_names() {
        assert_eq!(LikeAction::Added.as_str(), "added");
        assert_eq!(LikeAction::Removed.as_str(), "removed");
        assert!(LikeAction::Added.is_liked());
        assert!(!LikeAction::Removed.is_liked());
    }
}
