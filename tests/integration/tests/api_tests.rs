//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use feed_client::{FeedState, HttpFeedApi, ResponseCache, Viewer};
use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, create_member, like_rows, post_counters,
    share_rows, visible_comment_rows, SeededFeed, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn setup() -> Option<(TestServer, SeededFeed)> {
    if !check_test_env().await {
        return None;
    }
    let server = TestServer::start().await.expect("Failed to start server");
    let feed = SeededFeed::create(&server).await.expect("Failed to seed feed");
    Some((server, feed))
}

async fn post_comment(
    server: &TestServer,
    token: &str,
    post_id: i64,
    content: &str,
    parent_id: Option<i64>,
) -> Value {
    let body = json!({ "postId": post_id, "content": content, "parentId": parent_id });
    let response = server
        .post_auth("/api/posts/comment", token, &body)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Post Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_twice_returns_to_original_state() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (user, token) = create_member(&server).await.unwrap();
    let post_id = feed.post.into_inner();

    let response = server
        .post_auth("/api/posts/like", &token, &json!({ "postId": post_id }))
        .await
        .unwrap();
    let first: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first["action"], "added");
    assert_eq!(first["likesCount"], 1);

    let check = server
        .get_auth(
            &format!("/api/posts/like/check?postId={post_id}&userId={user}"),
            &feed.owner_token,
        )
        .await
        .unwrap();
    let check: Value = assert_json(check, StatusCode::OK).await.unwrap();
    assert_eq!(check["liked"], true);

    let anonymous = server
        .get(&format!("/api/posts/like/check?postId={post_id}&userId={user}"))
        .await
        .unwrap();
    assert_status(anonymous, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth("/api/posts/like", &token, &json!({ "postId": post_id }))
        .await
        .unwrap();
    let second: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second["action"], "removed");
    assert_eq!(second["likesCount"], 0);

    let (likes, _, _) = post_counters(&server.pool, feed.post).await.unwrap();
    assert_eq!(likes, like_rows(&server.pool, feed.post).await.unwrap());
    assert_eq!(likes, 0);
}

#[tokio::test]
async fn test_concurrent_likes_keep_counter_exact() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let post_id = feed.post.into_inner();

    let mut tokens = Vec::new();
    for _ in 0..5 {
        tokens.push(create_member(&server).await.unwrap().1);
    }

    let body = json!({ "postId": post_id });
    let requests = tokens
        .iter()
        .map(|token| server.post_auth("/api/posts/like", token, &body));
    for response in join_all(requests).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let (likes, _, _) = post_counters(&server.pool, feed.post).await.unwrap();
    assert_eq!(likes, 5);
    assert_eq!(like_rows(&server.pool, feed.post).await.unwrap(), 5);
}

#[tokio::test]
async fn test_like_requires_auth_and_post_id() {
    let Some((server, feed)) = setup().await else {
        return;
    };

    let response = server
        .post("/api/posts/like", &json!({ "postId": feed.post.into_inner() }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["success"], false);

    let response = server
        .post_auth("/api/posts/like", &feed.owner_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_like_unknown_post() {
    let Some((server, feed)) = setup().await else {
        return;
    };

    let response = server
        .post_auth("/api/posts/like", &feed.owner_token, &json!({ "postId": i64::MAX }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["code"], "UNKNOWN_POST");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_create_comment_bumps_count() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();

    let created = post_comment(&server, &token, feed.post.into_inner(), "hello", None).await;

    assert_eq!(created["success"], true);
    assert_eq!(created["comment"]["content"], "hello");
    assert_eq!(created["comment"]["replies"], json!([]));
    assert_eq!(created["commentsCount"], 1);

    let (_, comments, _) = post_counters(&server.pool, feed.post).await.unwrap();
    assert_eq!(comments, 1);
    assert_eq!(comments, visible_comment_rows(&server.pool, feed.post).await.unwrap());
}

#[tokio::test]
async fn test_replies_nest_under_root_oldest_first() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();
    let post_id = feed.post.into_inner();

    let root = post_comment(&server, &feed.owner_token, post_id, "root", None).await;
    let root_id = root["comment"]["id"].as_i64().unwrap();
    let first = post_comment(&server, &token, post_id, "first", Some(root_id)).await;
    let second = post_comment(&server, &token, post_id, "second", Some(root_id)).await;
    assert_eq!(second["commentsCount"], 3);

    let response = server
        .get_auth(&format!("/api/posts/comment?postId={post_id}"), &token)
        .await
        .unwrap();
    let listing: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(listing["count"], 1);
    assert_eq!(listing["totalReplies"], 2);
    let thread = &listing["comments"][0];
    assert_eq!(thread["id"], root_id);
    assert_eq!(thread["reply_count"], 2);
    assert_eq!(thread["user_name"], "Bakery");
    assert_eq!(thread["replies"][0]["id"], first["comment"]["id"]);
    assert_eq!(thread["replies"][1]["id"], second["comment"]["id"]);
}

#[tokio::test]
async fn test_reply_to_reply_is_rejected() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let post_id = feed.post.into_inner();

    let root = post_comment(&server, &feed.owner_token, post_id, "root", None).await;
    let reply = post_comment(
        &server,
        &feed.owner_token,
        post_id,
        "reply",
        root["comment"]["id"].as_i64(),
    )
    .await;

    let body = json!({
        "postId": post_id,
        "content": "too deep",
        "parentId": reply["comment"]["id"],
    });
    let response = server
        .post_auth("/api/posts/comment", &feed.owner_token, &body)
        .await
        .unwrap();
    let err: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err["code"], "INVALID_PARENT");
}

#[tokio::test]
async fn test_delete_requires_author() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();
    let created = post_comment(&server, &token, feed.post.into_inner(), "mine", None).await;
    let comment_id = created["comment"]["id"].as_i64().unwrap();

    let response = server
        .delete_auth(
            &format!("/api/posts/comment?commentId={comment_id}"),
            &feed.owner_token,
        )
        .await
        .unwrap();
    let err: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err["success"], false);
    let (_, comments, _) = post_counters(&server.pool, feed.post).await.unwrap();
    assert_eq!(comments, 1);

    let response = server
        .delete_auth(&format!("/api/posts/comment?commentId={comment_id}"), &token)
        .await
        .unwrap();
    let deleted: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted["commentsCount"], 0);

    let response = server
        .delete_auth(&format!("/api/posts/comment?commentId={comment_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_comment_writes_keep_counter_exact() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let post_id = feed.post.into_inner();

    let mut doomed = Vec::new();
    for i in 0..6 {
        let (_, token) = create_member(&server).await.unwrap();
        let created = post_comment(&server, &token, post_id, &format!("old {i}"), None).await;
        doomed.push((created["comment"]["id"].as_i64().unwrap(), token));
    }
    let mut writers = Vec::new();
    for _ in 0..6 {
        writers.push(create_member(&server).await.unwrap().1);
    }

    let body = json!({ "postId": post_id, "content": "new" });
    let paths: Vec<(String, &str)> = doomed
        .iter()
        .map(|(comment_id, token)| {
            (format!("/api/posts/comment?commentId={comment_id}"), token.as_str())
        })
        .collect();
    let deletes = paths
        .iter()
        .map(|(path, token)| server.delete_auth(path, token));
    let creates = writers
        .iter()
        .map(|token| server.post_auth("/api/posts/comment", token, &body));
    let (deleted, created) = futures::join!(join_all(deletes), join_all(creates));
    for response in deleted.into_iter().chain(created) {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let (_, comments, _) = post_counters(&server.pool, feed.post).await.unwrap();
    assert_eq!(comments, visible_comment_rows(&server.pool, feed.post).await.unwrap());
    assert_eq!(comments, 6);
}

#[tokio::test]
async fn test_deleted_root_hides_thread_but_replies_stay_reachable() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();
    let post_id = feed.post.into_inner();

    let root = post_comment(&server, &feed.owner_token, post_id, "root", None).await;
    let root_id = root["comment"]["id"].as_i64().unwrap();
    let reply = post_comment(&server, &token, post_id, "reply", Some(root_id)).await;

    let response = server
        .delete_auth(
            &format!("/api/posts/comment?commentId={root_id}"),
            &feed.owner_token,
        )
        .await
        .unwrap();
    let deleted: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted["commentsCount"], 1);

    let response = server
        .get_auth(&format!("/api/posts/comment?postId={post_id}"), &token)
        .await
        .unwrap();
    let listing: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing["count"], 0);

    let response = server
        .get_auth(
            &format!("/api/posts/comment/replies?commentId={root_id}"),
            &token,
        )
        .await
        .unwrap();
    let replies: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(replies["count"], 1);
    assert_eq!(replies["replies"][0]["id"], reply["comment"]["id"]);
}

#[tokio::test]
async fn test_listing_unknown_post() {
    let Some((server, feed)) = setup().await else {
        return;
    };

    let response = server
        .get_auth(
            &format!("/api/posts/comment?postId={}", i64::MAX),
            &feed.owner_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/api/posts/comment?postId={}", feed.post))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_comment_like_toggle() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();
    let created = post_comment(&server, &feed.owner_token, feed.post.into_inner(), "hi", None).await;
    let body = json!({ "commentId": created["comment"]["id"] });

    let response = server
        .post_auth("/api/posts/comment/like", &token, &body)
        .await
        .unwrap();
    let liked: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked["liked"], true);
    assert_eq!(liked["likeCount"], 1);

    let response = server
        .post_auth("/api/posts/comment/like", &token, &body)
        .await
        .unwrap();
    let unliked: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unliked["liked"], false);
    assert_eq!(unliked["likeCount"], 0);
}

// ============================================================================
// Share Tests
// ============================================================================

#[tokio::test]
async fn test_shares_accumulate() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();
    let body = json!({ "postId": feed.post.into_inner(), "sharedTo": "email" });

    for expected in 1..=3 {
        let response = server
            .post_auth("/api/posts/share", &token, &body)
            .await
            .unwrap();
        let shared: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(shared["sharesCount"], expected);
    }

    assert_eq!(share_rows(&server.pool, feed.post).await.unwrap(), 3);

    let response = server
        .get_auth(&format!("/api/posts/share?postId={}", feed.post), &token)
        .await
        .unwrap();
    let listing: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing["count"], 3);
    assert_eq!(listing["shares"][0]["shared_to"], "email");
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_owner_manages_posts() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let business_id = feed.business.into_inner();

    let body = json!({
        "businessId": business_id,
        "content": "New menu",
        "media": [{ "mediaUrl": "/uploads/menu.png", "mediaType": "image" }],
    });
    let response = server
        .post_auth("/api/posts", &feed.owner_token, &body)
        .await
        .unwrap();
    let created: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let post_id = created["postId"].as_i64().unwrap();
    assert_eq!(created["post"]["post_type"], "text");
    let media_id = created["post"]["media"][0]["id"].clone();

    let body = json!({
        "postId": post_id,
        "content": "Updated menu",
        "mediaToDelete": [media_id],
        "media": [{ "mediaUrl": "/uploads/menu-v2.png", "mediaType": "image" }],
    });
    let response = server
        .put_auth("/api/posts", &feed.owner_token, &body)
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["post"]["content"], "Updated menu");
    assert_eq!(updated["post"]["media"].as_array().map(Vec::len), Some(1));
    assert_eq!(updated["post"]["media"][0]["media_url"], "/uploads/menu-v2.png");

    let response = server
        .get(&format!("/api/posts?businessId={business_id}"))
        .await
        .unwrap();
    let listing: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing["posts"][0]["id"], post_id);
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(2));

    let response = server
        .delete_auth(&format!("/api/posts?postId={post_id}"), &feed.owner_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_non_owner_cannot_post() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (_, token) = create_member(&server).await.unwrap();

    let body = json!({ "businessId": feed.business.into_inner(), "content": "spam" });
    let response = server.post_auth("/api/posts", &token, &body).await.unwrap();
    let err: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err["code"], "NOT_BUSINESS_OWNER");

    let response = server
        .delete_auth(&format!("/api/posts?postId={}", feed.post), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Client Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_client_state_matches_server_after_actions() {
    let Some((server, feed)) = setup().await else {
        return;
    };
    let (user, token) = create_member(&server).await.unwrap();

    let api = HttpFeedApi::new(server.base_url()).unwrap().with_token(token);
    let viewer = Viewer {
        user_id: user,
        name: String::new(),
        logo: String::new(),
    };
    let mut state = FeedState::new(api, viewer, ResponseCache::new());

    state.load_posts(feed.business).await.unwrap();
    state.load_comments(feed.post).await.unwrap();

    state.toggle_post_like(feed.post).await.unwrap();
    state.share_post(feed.post, Some("facebook")).await.unwrap();
    let comment_id = state.create_comment(feed.post, "from client", None).await.unwrap();

    let post = state.post(feed.post).unwrap();
    assert!(post.liked_by_user);
    assert_eq!(
        (post.likes_count, post.comments_count, post.shares_count),
        post_counters(&server.pool, feed.post).await.unwrap()
    );
    assert_eq!(state.comments(feed.post)[0].id(), Some(comment_id));

    let err = state
        .create_comment(feed.post, "reply to nothing", Some(feed_core::CommentId::new(i64::MAX)))
        .await
        .unwrap_err();
    assert!(matches!(err, feed_client::ClientError::UnknownComment(_)));
}
