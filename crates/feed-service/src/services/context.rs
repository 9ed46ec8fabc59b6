//! Service context - dependency container for services

use std::sync::Arc;

use feed_common::auth::JwtService;
use feed_core::traits::{
    BusinessRepository, CommentLikeRepository, CommentRepository, PostLikeRepository,
    PostRepository, ShareRepository,
};
use feed_db::{
    PgBusinessRepository, PgCommentLikeRepository, PgCommentRepository, PgPool,
    PgPostLikeRepository, PgPostRepository, PgShareRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories are held as trait objects so services can run against
/// PostgreSQL or an in-memory double.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    business_repo: Arc<dyn BusinessRepository>,
    post_repo: Arc<dyn PostRepository>,
    post_like_repo: Arc<dyn PostLikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    comment_like_repo: Arc<dyn CommentLikeRepository>,
    share_repo: Arc<dyn ShareRepository>,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Wire every repository to PostgreSQL
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            business_repo: Arc::new(PgBusinessRepository::new(pool.clone())),
            post_repo: Arc::new(PgPostRepository::new(pool.clone())),
            post_like_repo: Arc::new(PgPostLikeRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            comment_like_repo: Arc::new(PgCommentLikeRepository::new(pool.clone())),
            share_repo: Arc::new(PgShareRepository::new(pool.clone())),
            pool,
            jwt_service,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn business_repo(&self) -> &dyn BusinessRepository {
        self.business_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn post_like_repo(&self) -> &dyn PostLikeRepository {
        self.post_like_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn comment_like_repo(&self) -> &dyn CommentLikeRepository {
        self.comment_like_repo.as_ref()
    }

    pub fn share_repo(&self) -> &dyn ShareRepository {
        self.share_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for assembling a ServiceContext from individual repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    business_repo: Option<Arc<dyn BusinessRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    post_like_repo: Option<Arc<dyn PostLikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    comment_like_repo: Option<Arc<dyn CommentLikeRepository>>,
    share_repo: Option<Arc<dyn ShareRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn business_repo(mut self, repo: Arc<dyn BusinessRepository>) -> Self {
        self.business_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn post_like_repo(mut self, repo: Arc<dyn PostLikeRepository>) -> Self {
        self.post_like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn comment_like_repo(mut self, repo: Arc<dyn CommentLikeRepository>) -> Self {
        self.comment_like_repo = Some(repo);
        self
    }

    pub fn share_repo(mut self, repo: Arc<dyn ShareRepository>) -> Self {
        self.share_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| missing("pool"))?,
            business_repo: self.business_repo.ok_or_else(|| missing("business_repo"))?,
            post_repo: self.post_repo.ok_or_else(|| missing("post_repo"))?,
            post_like_repo: self.post_like_repo.ok_or_else(|| missing("post_like_repo"))?,
            comment_repo: self.comment_repo.ok_or_else(|| missing("comment_repo"))?,
            comment_like_repo: self
                .comment_like_repo
                .ok_or_else(|| missing("comment_like_repo"))?,
            share_repo: self.share_repo.ok_or_else(|| missing("share_repo"))?,
            jwt_service: self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
