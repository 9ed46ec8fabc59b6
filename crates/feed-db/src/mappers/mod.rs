//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions plus helpers that assemble
//! aggregates from several result sets.

mod business;
mod comment;
mod post;
mod share;

pub use post::{attach_media, with_media};
