//! Feed API access
//!
//! [`FeedApi`] is the seam the view state talks through. [`HttpFeedApi`]
//! implements it over HTTP with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use feed_core::{BusinessId, CommentId, PostId, UserId};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    CommentLikeResponse, CommentListResponse, CreateCommentResponse, DeleteCommentResponse,
    ErrorEnvelope, LikeCheckResponse, PostLikeResponse, PostListResponse, PostRecord,
    ShareResponse,
};

/// Server calls made by the feed view
#[async_trait]
pub trait FeedApi: Send + Sync {
    async fn list_posts(&self, business_id: BusinessId) -> ClientResult<Vec<PostRecord>>;

    async fn toggle_post_like(&self, post_id: PostId) -> ClientResult<PostLikeResponse>;

    async fn check_post_like(&self, post_id: PostId, user_id: UserId) -> ClientResult<bool>;

    async fn list_comments(&self, post_id: PostId) -> ClientResult<CommentListResponse>;

    async fn create_comment(
        &self,
        post_id: PostId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> ClientResult<CreateCommentResponse>;

    async fn delete_comment(&self, comment_id: CommentId) -> ClientResult<DeleteCommentResponse>;

    async fn toggle_comment_like(&self, comment_id: CommentId)
        -> ClientResult<CommentLikeResponse>;

    async fn share_post(
        &self,
        post_id: PostId,
        shared_to: Option<&str>,
    ) -> ClientResult<ShareResponse>;
}

/// [`FeedApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpFeedApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpFeedApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` on every call
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = error_from_body(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Feed API call failed");
            return Err(err);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Turn a non-2xx body into [`ClientError::Api`], tolerating bodies that are not the envelope
fn error_from_body(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Api {
            status: status.as_u16(),
            code: envelope.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            message: envelope.error,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: "UNKNOWN".to_string(),
            message: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        },
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn list_posts(&self, business_id: BusinessId) -> ClientResult<Vec<PostRecord>> {
        let request = self
            .client
            .get(self.url("/posts"))
            .query(&[("businessId", business_id.to_string())]);
        let listing: PostListResponse = self.send(request).await?;
        Ok(listing.posts)
    }

    async fn toggle_post_like(&self, post_id: PostId) -> ClientResult<PostLikeResponse> {
        let request = self
            .client
            .post(self.url("/posts/like"))
            .json(&json!({ "postId": post_id }));
        self.send(request).await
    }

    async fn check_post_like(&self, post_id: PostId, user_id: UserId) -> ClientResult<bool> {
        let request = self.client.get(self.url("/posts/like/check")).query(&[
            ("postId", post_id.to_string()),
            ("userId", user_id.to_string()),
        ]);
        let check: LikeCheckResponse = self.send(request).await?;
        Ok(check.liked)
    }

    async fn list_comments(&self, post_id: PostId) -> ClientResult<CommentListResponse> {
        let request = self
            .client
            .get(self.url("/posts/comment"))
            .query(&[("postId", post_id.to_string())]);
        self.send(request).await
    }

    async fn create_comment(
        &self,
        post_id: PostId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> ClientResult<CreateCommentResponse> {
        let request = self.client.post(self.url("/posts/comment")).json(&json!({
            "postId": post_id,
            "content": content,
            "parentId": parent_id,
        }));
        self.send(request).await
    }

    async fn delete_comment(&self, comment_id: CommentId) -> ClientResult<DeleteCommentResponse> {
        let request = self
            .client
            .delete(self.url("/posts/comment"))
            .query(&[("commentId", comment_id.to_string())]);
        self.send(request).await
    }

    async fn toggle_comment_like(
        &self,
        comment_id: CommentId,
    ) -> ClientResult<CommentLikeResponse> {
        let request = self
            .client
            .post(self.url("/posts/comment/like"))
            .json(&json!({ "commentId": comment_id }));
        self.send(request).await
    }

    async fn share_post(
        &self,
        post_id: PostId,
        shared_to: Option<&str>,
    ) -> ClientResult<ShareResponse> {
        let request = self.client.post(self.url("/posts/share")).json(&json!({
            "postId": post_id,
            "sharedTo": shared_to,
        }));
        self.send(request).await
    }
}
