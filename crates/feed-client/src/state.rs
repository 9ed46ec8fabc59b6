//! Feed view state with optimistic updates
//!
//! Every user action runs in two steps. `begin_*` changes the local view at
//! once and returns a pending token holding what it overwrote. `finish_*`
//! takes that token and the server's answer: on success the server values
//! replace the local guess outright, on failure the overwritten values are
//! put back and the error is returned to the caller.
//!
//! The async `toggle_*`/`create_*`/`delete_*`/`share_*` methods chain both
//! steps around the [`FeedApi`] call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use feed_core::{BusinessId, CommentId, PostId, UserId};
use uuid::Uuid;

use crate::api::FeedApi;
use crate::cache::ResponseCache;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    CommentLikeResponse, CommentRecord, CreateCommentResponse, DeleteCommentResponse,
    PostLikeResponse, PostRecord, ShareResponse,
};

/// The signed-in user, used to render provisional comments
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user_id: UserId,
    pub name: String,
    pub logo: String,
}

/// Identity of a comment in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKey {
    /// Stored by the server
    Saved(CommentId),
    /// Shown locally while the create call is in flight
    Provisional(Uuid),
}

/// A comment as displayed, replies nested one level deep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub key: CommentKey,
    pub user_id: UserId,
    pub content: String,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_logo: String,
    pub likes_count: i64,
    pub liked_by_user: bool,
    pub reply_count: i64,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn is_provisional(&self) -> bool {
        matches!(self.key, CommentKey::Provisional(_))
    }

    pub fn id(&self) -> Option<CommentId> {
        match self.key {
            CommentKey::Saved(id) => Some(id),
            CommentKey::Provisional(_) => None,
        }
    }
}

impl From<CommentRecord> for CommentNode {
    fn from(record: CommentRecord) -> Self {
        Self {
            key: CommentKey::Saved(record.id),
            user_id: record.user_id,
            content: record.content,
            parent_id: record.parent_id,
            created_at: record.created_at,
            user_name: record.user_name,
            user_logo: record.user_logo,
            likes_count: record.likes_count,
            liked_by_user: record.liked_by_user,
            reply_count: record.reply_count,
            replies: record.replies.into_iter().map(Self::from).collect(),
        }
    }
}

/// Optimistic post like awaiting the server
#[derive(Debug)]
#[must_use = "pass the pending like to finish_post_like"]
pub struct PendingPostLike {
    post_id: PostId,
    liked_before: bool,
    count_before: i64,
}

/// Optimistic comment like awaiting the server
#[derive(Debug)]
#[must_use = "pass the pending like to finish_comment_like"]
pub struct PendingCommentLike {
    post_id: PostId,
    comment_id: CommentId,
    liked_before: bool,
    count_before: i64,
}

/// Provisional comment awaiting the server
#[derive(Debug)]
#[must_use = "pass the pending comment to finish_comment"]
pub struct PendingComment {
    post_id: PostId,
    key: CommentKey,
    parent_id: Option<CommentId>,
    content: String,
    comments_count_before: Option<i64>,
}

impl PendingComment {
    pub fn key(&self) -> CommentKey {
        self.key
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Comment hidden locally while its deletion is in flight
#[derive(Debug)]
#[must_use = "pass the pending delete to finish_delete_comment"]
pub struct PendingCommentDelete {
    post_id: PostId,
    comment_id: CommentId,
    node: CommentNode,
    index: usize,
    comments_count_before: Option<i64>,
}

/// Optimistic share awaiting the server
#[derive(Debug)]
#[must_use = "pass the pending share to finish_share"]
pub struct PendingShare {
    post_id: PostId,
    count_before: i64,
}

/// Posts and comment threads of one feed, kept in step with the server
pub struct FeedState<A> {
    api: A,
    viewer: Viewer,
    cache: ResponseCache,
    posts: Vec<PostRecord>,
    threads: HashMap<PostId, Vec<CommentNode>>,
}

/// Cache key of a post's comment listing
pub fn comments_cache_key(post_id: PostId) -> String {
    format!("comments:{post_id}")
}

impl<A: FeedApi> FeedState<A> {
    pub fn new(api: A, viewer: Viewer, cache: ResponseCache) -> Self {
        Self {
            api,
            viewer,
            cache,
            posts: Vec::new(),
            threads: HashMap::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn post(&self, post_id: PostId) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Root comments of a post, newest first; empty until loaded
    pub fn comments(&self, post_id: PostId) -> &[CommentNode] {
        self.threads
            .get(&post_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a comment or reply in a loaded thread
    pub fn comment(&self, post_id: PostId, comment_id: CommentId) -> Option<&CommentNode> {
        find(self.comments(post_id), CommentKey::Saved(comment_id))
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace the post list with the server's view of a business feed
    pub async fn load_posts(&mut self, business_id: BusinessId) -> ClientResult<()> {
        self.posts = self.api.list_posts(business_id).await?;
        tracing::debug!(%business_id, posts = self.posts.len(), "Feed loaded");
        Ok(())
    }

    /// Load a post's comment thread, from the cache when it holds a fresh copy
    pub async fn load_comments(&mut self, post_id: PostId) -> ClientResult<()> {
        let key = comments_cache_key(post_id);

        let records = match self.cache.get::<Vec<CommentRecord>>(&key) {
            Some(records) => records,
            None => {
                let listing = self.api.list_comments(post_id).await?;
                if let Err(e) = self.cache.set(&key, &listing.comments) {
                    tracing::warn!(error = %e, "Failed to cache comment listing");
                }
                listing.comments
            }
        };

        self.threads
            .insert(post_id, records.into_iter().map(CommentNode::from).collect());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Post likes
    // ------------------------------------------------------------------

    /// Flip the like flag and move the count by one
    pub fn begin_post_like(&mut self, post_id: PostId) -> ClientResult<PendingPostLike> {
        let post = self.post_mut(post_id)?;
        let pending = PendingPostLike {
            post_id,
            liked_before: post.liked_by_user,
            count_before: post.likes_count,
        };

        post.likes_count += if post.liked_by_user { -1 } else { 1 };
        post.liked_by_user = !post.liked_by_user;
        Ok(pending)
    }

    pub fn finish_post_like(
        &mut self,
        pending: PendingPostLike,
        result: ClientResult<PostLikeResponse>,
    ) -> ClientResult<()> {
        let post = self.post_mut(pending.post_id)?;
        match result {
            Ok(response) => {
                post.liked_by_user = response.liked();
                post.likes_count = response.likes_count;
                Ok(())
            }
            Err(e) => {
                post.liked_by_user = pending.liked_before;
                post.likes_count = pending.count_before;
                tracing::warn!(post_id = %pending.post_id, error = %e, "Post like rolled back");
                Err(e)
            }
        }
    }

    pub async fn toggle_post_like(&mut self, post_id: PostId) -> ClientResult<()> {
        let pending = self.begin_post_like(post_id)?;
        let result = self.api.toggle_post_like(post_id).await;
        self.finish_post_like(pending, result)
    }

    // ------------------------------------------------------------------
    // Comment likes
    // ------------------------------------------------------------------

    pub fn begin_comment_like(
        &mut self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ClientResult<PendingCommentLike> {
        let node = self.comment_mut(post_id, CommentKey::Saved(comment_id))?;
        let pending = PendingCommentLike {
            post_id,
            comment_id,
            liked_before: node.liked_by_user,
            count_before: node.likes_count,
        };

        node.likes_count += if node.liked_by_user { -1 } else { 1 };
        node.liked_by_user = !node.liked_by_user;
        Ok(pending)
    }

    pub fn finish_comment_like(
        &mut self,
        pending: PendingCommentLike,
        result: ClientResult<CommentLikeResponse>,
    ) -> ClientResult<()> {
        let node = self.comment_mut(pending.post_id, CommentKey::Saved(pending.comment_id))?;
        match result {
            Ok(response) => {
                node.liked_by_user = response.liked;
                node.likes_count = response.like_count;
                self.invalidate_comments(pending.post_id);
                Ok(())
            }
            Err(e) => {
                node.liked_by_user = pending.liked_before;
                node.likes_count = pending.count_before;
                tracing::warn!(comment_id = %pending.comment_id, error = %e, "Comment like rolled back");
                Err(e)
            }
        }
    }

    pub async fn toggle_comment_like(
        &mut self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ClientResult<()> {
        let pending = self.begin_comment_like(post_id, comment_id)?;
        let result = self.api.toggle_comment_like(comment_id).await;
        self.finish_comment_like(pending, result)
    }

    // ------------------------------------------------------------------
    // Comment create
    // ------------------------------------------------------------------

    /// Show a provisional comment at once
    ///
    /// Roots go to the top of the thread, replies to the end of their
    /// parent's replies. A reply needs its parent's thread loaded.
    pub fn begin_comment(
        &mut self,
        post_id: PostId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> ClientResult<PendingComment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ClientError::EmptyContent);
        }

        let node = CommentNode {
            key: CommentKey::Provisional(Uuid::new_v4()),
            user_id: self.viewer.user_id,
            content: content.to_string(),
            parent_id,
            created_at: Utc::now(),
            user_name: self.viewer.name.clone(),
            user_logo: self.viewer.logo.clone(),
            likes_count: 0,
            liked_by_user: false,
            reply_count: 0,
            replies: Vec::new(),
        };
        let key = node.key;

        match parent_id {
            Some(parent) => {
                let parent_node = self.comment_mut(post_id, CommentKey::Saved(parent))?;
                parent_node.reply_count += 1;
                parent_node.replies.push(node);
            }
            None => self.threads.entry(post_id).or_default().insert(0, node),
        }

        let comments_count_before = self.bump_comments_count(post_id, 1);

        Ok(PendingComment {
            post_id,
            key,
            parent_id,
            content: content.to_string(),
            comments_count_before,
        })
    }

    /// Swap the provisional comment for the stored one, or remove it
    pub fn finish_comment(
        &mut self,
        pending: PendingComment,
        result: ClientResult<CreateCommentResponse>,
    ) -> ClientResult<CommentId> {
        match result {
            Ok(response) => {
                let id = response.comment.id;
                let saved = CommentNode::from(response.comment);
                match self.comment_mut(pending.post_id, pending.key) {
                    Ok(node) => *node = saved,
                    Err(_) => self.place_saved(pending.post_id, saved),
                }
                self.set_comments_count(pending.post_id, response.comments_count);
                self.invalidate_comments(pending.post_id);
                Ok(id)
            }
            Err(e) => {
                if let Some(thread) = self.threads.get_mut(&pending.post_id) {
                    detach(thread, pending.key);
                    if let Some(parent) = pending.parent_id {
                        if let Some(node) = find_mut(thread, CommentKey::Saved(parent)) {
                            node.reply_count -= 1;
                        }
                    }
                }
                if let Some(count) = pending.comments_count_before {
                    self.set_comments_count(pending.post_id, count);
                }
                tracing::warn!(post_id = %pending.post_id, error = %e, "Provisional comment removed");
                Err(e)
            }
        }
    }

    pub async fn create_comment(
        &mut self,
        post_id: PostId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> ClientResult<CommentId> {
        let pending = self.begin_comment(post_id, content, parent_id)?;
        let result = self
            .api
            .create_comment(post_id, &pending.content, parent_id)
            .await;
        self.finish_comment(pending, result)
    }

    // ------------------------------------------------------------------
    // Comment delete
    // ------------------------------------------------------------------

    /// Hide a comment while its deletion is in flight
    ///
    /// Hiding a root hides its replies with it, as the server listing does.
    pub fn begin_delete_comment(
        &mut self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ClientResult<PendingCommentDelete> {
        let thread = self
            .threads
            .get_mut(&post_id)
            .ok_or(ClientError::UnknownComment(comment_id))?;
        let (node, index) = detach(thread, CommentKey::Saved(comment_id))
            .ok_or(ClientError::UnknownComment(comment_id))?;

        if let Some(parent) = node.parent_id {
            if let Some(parent_node) = find_mut(thread, CommentKey::Saved(parent)) {
                parent_node.reply_count -= 1;
            }
        }

        let comments_count_before = self.bump_comments_count(post_id, -1);

        Ok(PendingCommentDelete {
            post_id,
            comment_id,
            node,
            index,
            comments_count_before,
        })
    }

    pub fn finish_delete_comment(
        &mut self,
        pending: PendingCommentDelete,
        result: ClientResult<DeleteCommentResponse>,
    ) -> ClientResult<()> {
        match result {
            Ok(response) => {
                self.set_comments_count(pending.post_id, response.comments_count);
                self.invalidate_comments(pending.post_id);
                Ok(())
            }
            Err(e) => {
                let thread = self.threads.entry(pending.post_id).or_default();
                match pending.node.parent_id {
                    Some(parent) => {
                        if let Some(parent_node) = find_mut(thread, CommentKey::Saved(parent)) {
                            parent_node.reply_count += 1;
                            let index = pending.index.min(parent_node.replies.len());
                            parent_node.replies.insert(index, pending.node);
                        }
                    }
                    None => {
                        let index = pending.index.min(thread.len());
                        thread.insert(index, pending.node);
                    }
                }
                if let Some(count) = pending.comments_count_before {
                    self.set_comments_count(pending.post_id, count);
                }
                tracing::warn!(comment_id = %pending.comment_id, error = %e, "Comment delete rolled back");
                Err(e)
            }
        }
    }

    pub async fn delete_comment(&mut self, post_id: PostId, comment_id: CommentId) -> ClientResult<()> {
        let pending = self.begin_delete_comment(post_id, comment_id)?;
        let result = self.api.delete_comment(comment_id).await;
        self.finish_delete_comment(pending, result)
    }

    // ------------------------------------------------------------------
    // Shares
    // ------------------------------------------------------------------

    pub fn begin_share(&mut self, post_id: PostId) -> ClientResult<PendingShare> {
        let post = self.post_mut(post_id)?;
        let pending = PendingShare {
            post_id,
            count_before: post.shares_count,
        };
        post.shares_count += 1;
        Ok(pending)
    }

    pub fn finish_share(
        &mut self,
        pending: PendingShare,
        result: ClientResult<ShareResponse>,
    ) -> ClientResult<()> {
        let post = self.post_mut(pending.post_id)?;
        match result {
            Ok(response) => {
                post.shares_count = response.shares_count;
                Ok(())
            }
            Err(e) => {
                post.shares_count = pending.count_before;
                tracing::warn!(post_id = %pending.post_id, error = %e, "Share rolled back");
                Err(e)
            }
        }
    }

    pub async fn share_post(&mut self, post_id: PostId, shared_to: Option<&str>) -> ClientResult<()> {
        let pending = self.begin_share(post_id)?;
        let result = self.api.share_post(post_id, shared_to).await;
        self.finish_share(pending, result)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn post_mut(&mut self, post_id: PostId) -> ClientResult<&mut PostRecord> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(ClientError::UnknownPost(post_id))
    }

    fn comment_mut(&mut self, post_id: PostId, key: CommentKey) -> ClientResult<&mut CommentNode> {
        let missing = || match key {
            CommentKey::Saved(id) => ClientError::UnknownComment(id),
            CommentKey::Provisional(_) => ClientError::UnknownPost(post_id),
        };
        let thread = self.threads.get_mut(&post_id).ok_or_else(missing)?;
        find_mut(thread, key).ok_or_else(missing)
    }

    /// Put a stored comment whose provisional node is gone back into view
    ///
    /// A thread reloaded mid-flight may already hold it. A reply whose parent
    /// is no longer shown stays out of view, like any reply of a hidden root.
    fn place_saved(&mut self, post_id: PostId, saved: CommentNode) {
        let thread = self.threads.entry(post_id).or_default();
        if find(thread, saved.key).is_some() {
            return;
        }

        match saved.parent_id {
            None => thread.insert(0, saved),
            Some(parent) => match find_mut(thread, CommentKey::Saved(parent)) {
                Some(parent_node) => {
                    parent_node.reply_count += 1;
                    parent_node.replies.push(saved);
                }
                None => {
                    tracing::warn!(
                        %post_id,
                        parent_id = %parent,
                        comment_id = ?saved.id(),
                        "Stored reply has no parent in view"
                    );
                }
            },
        }
    }

    /// Move a post's `comments_count` by `delta`, returning the old value
    fn bump_comments_count(&mut self, post_id: PostId, delta: i64) -> Option<i64> {
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        let before = post.comments_count;
        post.comments_count = (before + delta).max(0);
        Some(before)
    }

    fn set_comments_count(&mut self, post_id: PostId, count: i64) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments_count = count;
        }
    }

    fn invalidate_comments(&self, post_id: PostId) {
        if let Err(e) = self.cache.delete(&comments_cache_key(post_id)) {
            tracing::warn!(%post_id, error = %e, "Failed to invalidate comment cache");
        }
    }
}

fn find(nodes: &[CommentNode], key: CommentKey) -> Option<&CommentNode> {
    nodes
        .iter()
        .find_map(|node| if node.key == key { Some(node) } else { find(&node.replies, key) })
}

fn find_mut(nodes: &mut [CommentNode], key: CommentKey) -> Option<&mut CommentNode> {
    nodes.iter_mut().find_map(|node| {
        if node.key == key {
            Some(node)
        } else {
            find_mut(&mut node.replies, key)
        }
    })
}

/// Remove a node from the thread, returning it with its position among its siblings
fn detach(nodes: &mut Vec<CommentNode>, key: CommentKey) -> Option<(CommentNode, usize)> {
    if let Some(index) = nodes.iter().position(|n| n.key == key) {
        return Some((nodes.remove(index), index));
    }
    nodes.iter_mut().find_map(|node| detach(&mut node.replies, key))
}
