//! Error and transaction helpers for repositories

use feed_core::error::DomainError;
use feed_core::traits::RepoResult;
use feed_core::value_objects::{CommentId, PostId};
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::warn;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: sqlx::Error) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "post not found" error
pub fn post_not_found(id: PostId) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: CommentId) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Lock a post row for the rest of the transaction
///
/// Serializes every counter recomputation on the same post.
pub async fn lock_post(conn: &mut PgConnection, id: PostId) -> RepoResult<()> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
        .bind(id.into_inner())
        .fetch_optional(conn)
        .await
        .map_err(map_db_error)?
        .map(|_| ())
        .ok_or_else(|| post_not_found(id))
}

/// Commit on success, roll back explicitly on failure
pub async fn finish<T>(tx: Transaction<'_, Postgres>, result: RepoResult<T>) -> RepoResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(map_db_error)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
