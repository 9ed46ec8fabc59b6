//! Integration test utilities for the feed server
//!
//! Spawns the REST API against a real PostgreSQL database and seeds
//! users, businesses and posts directly with SQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
