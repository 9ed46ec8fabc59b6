//! Business entity - the tenant that owns posts

use chrono::{DateTime, Utc};

use crate::value_objects::{BusinessId, UserId};

/// Business entity (only the fields the feed needs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    pub id: BusinessId,
    pub owner_id: UserId,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Business {
    /// Check if the given user owns this business
    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Display identity of a comment author, resolved through the business they own.
///
/// Users without a business get empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub logo: String,
}

impl Author {
    pub fn new(name: impl Into<String>, logo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo: logo.into(),
        }
    }

    /// Check if the author has no business profile
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() && self.logo.is_empty()
    }
}
