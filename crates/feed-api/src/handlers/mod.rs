//! Route handlers, one module per resource

pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;
pub mod shares;
