//! # feed-db
//!
//! Database layer implementing the `feed-core` repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and the migration runner
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations; every ledger write and its counter
//!   recomputation share one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feed_db::{create_pool, run_migrations, DatabaseConfig, PgPostLikeRepository};
//! use feed_core::PostLikeRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/feed")).await?;
//!     run_migrations(&pool, "crates/feed-db/migrations").await?;
//!
//!     let likes = PgPostLikeRepository::new(pool);
//!     let result = likes.toggle(7.into(), 1.into()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgBusinessRepository, PgCommentLikeRepository, PgCommentRepository, PgPostLikeRepository,
    PgPostRepository, PgShareRepository,
};
