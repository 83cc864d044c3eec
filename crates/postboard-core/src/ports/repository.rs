use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining the lookups every table supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user and return it with its assigned ID.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository. Posts always come back with their author resolved.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// All published posts, newest first.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Find the post an author has under a given name, if any.
    async fn find_by_author_and_name(
        &self,
        author_id: i64,
        name: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Persist a new post. Fails with `RepoError::Constraint` when the
    /// author already has a post with the same name.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Write the client-writable fields of an existing post.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}
