//! Axum extractors for request handling
//!
//! Bearer-token authentication plus JSON bodies and query strings that
//! reject with the API error envelope instead of axum's plain-text bodies.

mod auth;
mod input;

pub use auth::{AuthUser, OptionalAuthUser};
pub use input::{QueryParams, ValidatedJson};
