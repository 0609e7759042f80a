//! In-memory store implementations - used as fallback when the database is
//! not configured, and as the persistence double in endpoint tests.
//!
//! Semantics mirror the Postgres stores: usernames are unique, posts list
//! newest first, partial updates leave absent fields untouched.
//! Note: Data is lost on process restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, NewUser, Post, PostUpdate, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// Shared backing storage for the in-memory repositories.
///
/// Both repositories are views over one store so that posts can resolve
/// their author's username, like the SQL join does.
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    next_user_id: AtomicI64,
    next_post_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
            next_user_id: AtomicI64::new(1),
            next_post_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut users = self.store.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;

        // Same uniqueness rule the DB constraint enforces.
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let user = User {
            id: self.store.next_user_id.fetch_add(1, Ordering::SeqCst),
            username: new_user.username,
            password_hash: new_user.password_hash,
        };
        users.push(user.clone());

        Ok(user)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    async fn author_of(&self, post: &Post) -> Option<String> {
        let users = self.store.users.read().await;
        users
            .iter()
            .find(|u| u.id == post.user_id)
            .map(|u| u.username.clone())
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut posts = self.store.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;

        let post = Post {
            id: self.store.next_post_id.fetch_add(1, Ordering::SeqCst),
            user_id: new_post.user_id,
            title: new_post.title,
            content: new_post.content,
            created_at: new_post.created_at,
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn update(&self, id: i64, changes: PostUpdate) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }

        Ok(post.clone())
    }

    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut rows = {
            let posts = self.store.posts.read().await;
            posts.clone()
        };
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut joined = Vec::with_capacity(rows.len());
        for post in rows {
            let author = self.author_of(&post).await;
            joined.push(PostWithAuthor { post, author });
        }

        Ok(joined)
    }

    async fn find_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, RepoError> {
        let post = {
            let posts = self.store.posts.read().await;
            posts.iter().find(|p| p.id == id).cloned()
        };

        match post {
            Some(post) => {
                let author = self.author_of(&post).await;
                Ok(Some(PostWithAuthor { post, author }))
            }
            None => Ok(None),
        }
    }
}
