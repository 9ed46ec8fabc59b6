//! Route table
//!
//! Feed endpoints live under `/api`; health probes sit at the root so they
//! can be mounted outside the rate limiter.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{comments, health, likes, posts, shares};
use crate::state::AppState;

/// Feed API routes, nested under `/api`
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", post_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(posts::list_posts)
                .post(posts::create_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/like", post(likes::toggle_post_like))
        .route("/posts/like/check", get(likes::check_post_like))
        .route(
            "/posts/comment",
            get(comments::list_comments)
                .post(comments::create_comment)
                .delete(comments::delete_comment),
        )
        .route("/posts/comment/like", post(likes::toggle_comment_like))
        .route("/posts/comment/replies", get(comments::list_replies))
        .route(
            "/posts/share",
            get(shares::list_shares).post(shares::share_post),
        )
}
