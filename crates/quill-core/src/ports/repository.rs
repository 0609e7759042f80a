use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostUpdate, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait defining the operations shared by all stores.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User store with domain-specific methods.
///
/// Username uniqueness is enforced by the store; a duplicate insert surfaces
/// as `RepoError::Constraint`.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Persist a new post and return it with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update; absent fields keep their prior values.
    async fn update(&self, id: i64, changes: PostUpdate) -> Result<Post, RepoError>;

    /// All posts, newest first, each joined with its author's username.
    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// One post joined with its author's username.
    async fn find_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, RepoError>;
}
