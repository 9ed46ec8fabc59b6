//! Typed database identifiers
//!
//! Every table uses a `BIGSERIAL` key. Each entity gets its own newtype so a
//! post id can never be passed where a comment id is expected.
//!
//! Ids serialize as JSON numbers and deserialize from either a number or a
//! numeric string, so they work in JSON bodies and in query strings alike.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error when parsing an id from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
    #[error("id must be positive")]
    NotPositive,
}

fn parse_positive(s: &str) -> Result<i64, IdParseError> {
    let value = s
        .trim()
        .parse::<i64>()
        .map_err(|_| IdParseError::InvalidFormat)?;
    if value <= 0 {
        return Err(IdParseError::NotPositive);
    }
    Ok(value)
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database key
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                parse_positive(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                use serde::de::{self, Visitor};

                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str(concat!("a positive integer or numeric string ", $label))
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        if value <= 0 {
                            return Err(de::Error::custom(concat!($label, " must be positive")));
                        }
                        Ok($name(value))
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        let value = i64::try_from(value)
                            .map_err(|_| de::Error::custom(concat!($label, " out of range")))?;
                        self.visit_i64(value)
                    }

                    fn visit_str<E>(self, value: &str) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        $name::parse(value).map_err(|e| de::Error::custom(format!("{}: {e}", $label)))
                    }
                }

                deserializer.deserialize_any(IdVisitor)
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `users`
    UserId,
    "user id"
);
define_id!(
    /// Identifier of a row in `businesses` (the tenant)
    BusinessId,
    "business id"
);
define_id!(
    /// Identifier of a row in `posts`
    PostId,
    "post id"
);
define_id!(
    /// Identifier of a row in `post_media`
    MediaId,
    "media id"
);
define_id!(
    /// Identifier of a row in `comments`
    CommentId,
    "comment id"
);
define_id!(
    /// Identifier of a row in `shares`
    ShareId,
    "share id"
);
