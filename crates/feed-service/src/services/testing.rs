//! In-memory repository doubles for service tests
//!
//! `InMemoryFeed` implements every repository trait over one shared state so
//! counters are recomputed from the ledgers the same way PostgreSQL does it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use feed_common::JwtService;
use feed_core::{
    Author, Business, BusinessId, BusinessRepository, Comment, CommentId, CommentLikeRepository,
    CommentLikeToggle, CommentRepository, CommentView, DomainError, LikeAction, MediaId,
    NewComment, NewPost, Post, PostId, PostLikeRepository, PostLikeToggle, PostMedia,
    PostRepository, PostUpdate, PostWithMedia, RepoResult, Share, ShareId, ShareRepository,
    UserId,
};
use sqlx::postgres::PgPoolOptions;

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    next_id: i64,
    businesses: Vec<Business>,
    posts: Vec<Post>,
    media: Vec<PostMedia>,
    comments: Vec<Comment>,
    post_likes: HashSet<(PostId, UserId)>,
    comment_likes: HashSet<(CommentId, UserId)>,
    shares: Vec<Share>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn post_mut(&mut self, id: PostId) -> RepoResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(DomainError::PostNotFound(id))
    }

    fn recount_comments(&mut self, post_id: PostId) -> RepoResult<i64> {
        let count = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && !c.is_deleted())
            .count() as i64;
        self.post_mut(post_id)?.comments_count = count;
        Ok(count)
    }

    fn author_of(&self, user_id: UserId) -> Author {
        self.businesses
            .iter()
            .filter(|b| b.owner_id == user_id)
            .min_by_key(|b| b.id)
            .map(|b| Author::new(b.name.clone(), b.logo.clone().unwrap_or_default()))
            .unwrap_or_default()
    }

    fn view(&self, comment: &Comment, viewer: UserId) -> CommentView {
        CommentView {
            comment: comment.clone(),
            author: self.author_of(comment.user_id),
            likes_count: self
                .comment_likes
                .iter()
                .filter(|(id, _)| *id == comment.id)
                .count() as i64,
            liked_by_user: self.comment_likes.contains(&(comment.id, viewer)),
            reply_count: self
                .comments
                .iter()
                .filter(|c| c.parent_id == Some(comment.id) && !c.is_deleted())
                .count() as i64,
            replies: Vec::new(),
        }
    }

    fn with_media(&self, post: &Post, viewer: Option<UserId>) -> PostWithMedia {
        PostWithMedia {
            post: post.clone(),
            media: self
                .media
                .iter()
                .filter(|m| m.post_id == post.id)
                .cloned()
                .collect(),
            liked_by_user: viewer.is_some_and(|user| self.post_likes.contains(&(post.id, user))),
        }
    }
}

/// Shared in-memory store behind every repository trait
#[derive(Clone, Default)]
pub struct InMemoryFeed {
    state: Arc<Mutex<State>>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context whose repositories all point at this store
    pub fn context(&self) -> ServiceContext {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/feed_test")
            .unwrap();
        ServiceContextBuilder::new()
            .pool(pool)
            .business_repo(Arc::new(self.clone()))
            .post_repo(Arc::new(self.clone()))
            .post_like_repo(Arc::new(self.clone()))
            .comment_repo(Arc::new(self.clone()))
            .comment_like_repo(Arc::new(self.clone()))
            .share_repo(Arc::new(self.clone()))
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
            .build()
            .unwrap()
    }

    pub fn add_business(&self, owner: UserId, name: &str) -> BusinessId {
        let mut state = self.state.lock().unwrap();
        let id = BusinessId::new(state.next_id());
        state.businesses.push(Business {
            id,
            owner_id: owner,
            name: name.to_string(),
            logo: Some(format!("/logos/{id}.png")),
            created_at: Utc::now(),
        });
        id
    }

    pub fn add_post(&self, business_id: BusinessId) -> PostId {
        let mut state = self.state.lock().unwrap();
        let id = PostId::new(state.next_id());
        let now = Utc::now();
        state.posts.push(Post {
            id,
            business_id,
            content: format!("post {id}"),
            post_type: Post::DEFAULT_TYPE.to_string(),
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        let state = self.state.lock().unwrap();
        state.posts.iter().find(|p| p.id == id).cloned()
    }

    pub fn comment(&self, id: CommentId) -> Option<Comment> {
        let state = self.state.lock().unwrap();
        state.comments.iter().find(|c| c.id == id).cloned()
    }

    pub fn share_rows(&self, post_id: PostId) -> usize {
        let state = self.state.lock().unwrap();
        state.shares.iter().filter(|s| s.post_id == post_id).count()
    }
}

#[async_trait]
impl BusinessRepository for InMemoryFeed {
    async fn find_by_id(&self, id: BusinessId) -> RepoResult<Option<Business>> {
        let state = self.state.lock().unwrap();
        Ok(state.businesses.iter().find(|b| b.id == id).cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryFeed {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.post(id))
    }

    async fn list_by_business(
        &self,
        business_id: BusinessId,
        viewer: Option<UserId>,
    ) -> RepoResult<Vec<PostWithMedia>> {
        let state = self.state.lock().unwrap();
        let mut posts: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| p.business_id == business_id)
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse((p.created_at, p.id)));
        Ok(posts.into_iter().map(|p| state.with_media(p, viewer)).collect())
    }

    async fn create(&self, new: &NewPost) -> RepoResult<PostWithMedia> {
        let mut state = self.state.lock().unwrap();
        let id = PostId::new(state.next_id());
        let now = Utc::now();
        let post = Post {
            id,
            business_id: new.business_id,
            content: new.content.clone(),
            post_type: new.post_type.clone(),
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(post.clone());
        for item in &new.media {
            let media_id = MediaId::new(state.next_id());
            state.media.push(PostMedia {
                id: media_id,
                post_id: id,
                media_url: item.media_url.clone(),
                media_type: item.media_type.clone(),
                uploaded_at: now,
            });
        }
        Ok(state.with_media(&post, None))
    }

    async fn update(
        &self,
        id: PostId,
        update: &PostUpdate,
        viewer: UserId,
    ) -> RepoResult<PostWithMedia> {
        let mut state = self.state.lock().unwrap();
        let post = state.post_mut(id)?;
        post.content = update.content.clone();
        post.post_type = update.post_type.clone();
        post.updated_at = Utc::now();
        let post = post.clone();

        state
            .media
            .retain(|m| !(m.post_id == id && update.media_to_delete.contains(&m.id)));
        for item in &update.new_media {
            let media_id = MediaId::new(state.next_id());
            state.media.push(PostMedia {
                id: media_id,
                post_id: id,
                media_url: item.media_url.clone(),
                media_type: item.media_type.clone(),
                uploaded_at: Utc::now(),
            });
        }
        Ok(state.with_media(&post, Some(viewer)))
    }

    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        state.post_mut(id)?;
        state.media.retain(|m| m.post_id != id);
        state.posts.retain(|p| p.id != id);
        state.comments.retain(|c| c.post_id != id);
        state.post_likes.retain(|(post_id, _)| *post_id != id);
        state.shares.retain(|s| s.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostLikeRepository for InMemoryFeed {
    async fn toggle(&self, post_id: PostId, user_id: UserId) -> RepoResult<PostLikeToggle> {
        let mut state = self.state.lock().unwrap();
        state.post_mut(post_id)?;
        let existed = state.post_likes.remove(&(post_id, user_id));
        if !existed {
            state.post_likes.insert((post_id, user_id));
        }
        let likes_count = state
            .post_likes
            .iter()
            .filter(|(id, _)| *id == post_id)
            .count() as i64;
        state.post_mut(post_id)?.likes_count = likes_count;
        Ok(PostLikeToggle {
            action: LikeAction::from_existing(existed),
            likes_count,
        })
    }

    async fn exists(&self, post_id: PostId, user_id: UserId) -> RepoResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.post_likes.contains(&(post_id, user_id)))
    }
}

#[async_trait]
impl CommentLikeRepository for InMemoryFeed {
    async fn toggle(
        &self,
        comment_id: CommentId,
        user_id: UserId,
    ) -> RepoResult<CommentLikeToggle> {
        let mut state = self.state.lock().unwrap();
        let visible = state
            .comments
            .iter()
            .any(|c| c.id == comment_id && !c.is_deleted());
        if !visible {
            return Err(DomainError::CommentNotFound(comment_id));
        }
        let existed = state.comment_likes.remove(&(comment_id, user_id));
        if !existed {
            state.comment_likes.insert((comment_id, user_id));
        }
        let like_count = state
            .comment_likes
            .iter()
            .filter(|(id, _)| *id == comment_id)
            .count() as i64;
        Ok(CommentLikeToggle {
            liked: !existed,
            like_count,
        })
    }
}

#[async_trait]
impl CommentRepository for InMemoryFeed {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.comment(id))
    }

    async fn create(&self, new: &NewComment) -> RepoResult<(CommentView, i64)> {
        let mut state = self.state.lock().unwrap();
        state.post_mut(new.post_id)?;

        if let Some(parent_id) = new.parent_id {
            let parent = state
                .comments
                .iter()
                .find(|c| c.id == parent_id)
                .ok_or(DomainError::CommentNotFound(parent_id))?;
            if !parent.accepts_replies_on(new.post_id) {
                return Err(DomainError::InvalidParent);
            }
        }

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::new(state.next_id()),
            post_id: new.post_id,
            user_id: new.user_id,
            content: new.content.clone(),
            parent_id: new.parent_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.comments.push(comment.clone());
        let count = state.recount_comments(new.post_id)?;
        Ok((state.view(&comment, new.user_id), count))
    }

    async fn soft_delete(&self, id: CommentId, actor: UserId) -> RepoResult<i64> {
        let mut state = self.state.lock().unwrap();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id && !c.is_deleted())
            .ok_or(DomainError::CommentNotFound(id))?;
        if !comment.is_authored_by(actor) {
            return Err(DomainError::NotCommentAuthor);
        }
        comment.deleted_at = Some(Utc::now());
        let post_id = comment.post_id;
        state.recount_comments(post_id)
    }

    async fn list_roots(&self, post_id: PostId, viewer: UserId) -> RepoResult<Vec<CommentView>> {
        let state = self.state.lock().unwrap();
        let mut roots: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && !c.is_reply() && !c.is_deleted())
            .collect();
        roots.sort_by_key(|c| std::cmp::Reverse((c.created_at, c.id)));
        Ok(roots.into_iter().map(|c| state.view(c, viewer)).collect())
    }

    async fn list_replies(
        &self,
        parent_id: CommentId,
        viewer: UserId,
    ) -> RepoResult<Vec<CommentView>> {
        let state = self.state.lock().unwrap();
        let mut replies: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.parent_id == Some(parent_id) && !c.is_deleted())
            .collect();
        replies.sort_by_key(|c| (c.created_at, c.id));
        Ok(replies.into_iter().map(|c| state.view(c, viewer)).collect())
    }
}

#[async_trait]
impl ShareRepository for InMemoryFeed {
    async fn record(
        &self,
        post_id: PostId,
        user_id: UserId,
        shared_to: Option<&str>,
    ) -> RepoResult<i64> {
        let mut state = self.state.lock().unwrap();
        state.post_mut(post_id)?;
        let id = ShareId::new(state.next_id());
        state.shares.push(Share {
            id,
            post_id,
            user_id,
            shared_to: shared_to.map(str::to_string),
            created_at: Utc::now(),
        });
        let shares_count = state.shares.iter().filter(|s| s.post_id == post_id).count() as i64;
        state.post_mut(post_id)?.shares_count = shares_count;
        Ok(shares_count)
    }

    async fn list_for_post(&self, post_id: PostId) -> RepoResult<Vec<Share>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .shares
            .iter()
            .filter(|s| s.post_id == post_id)
            .cloned()
            .collect())
    }
}
