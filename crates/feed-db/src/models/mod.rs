//! Database models - SQLx-compatible structs for PostgreSQL tables

mod business;
mod comment;
mod post;
mod share;

pub use business::BusinessModel;
pub use comment::{CommentModel, CommentViewModel};
pub use post::{PostMediaModel, PostModel, PostRowModel};
pub use share::ShareModel;
