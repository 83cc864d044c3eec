//! In-memory repositories - used when no database is configured, and in tests.
//!
//! They enforce the same uniqueness rules as the PostgreSQL schema.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, NewUser, Post, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository, UserRepository};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory post table keyed by id.
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }

    /// Number of stored posts, published or not.
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn name_taken(table: &Table<Post>, author_id: i64, name: &str, except: Option<i64>) -> bool {
    table
        .rows
        .values()
        .any(|p| p.author.id == author_id && p.name == name && Some(p.id) != except)
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut posts: Vec<Post> = table
            .rows
            .values()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_by_author_and_name(
        &self,
        author_id: i64,
        name: &str,
    ) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|p| p.author.id == author_id && p.name == name)
            .cloned())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        if name_taken(&table, new_post.author.id, &new_post.name, None) {
            return Err(RepoError::Constraint("unique_author_post".to_string()));
        }

        let post = Post {
            id: table.allocate_id(),
            name: new_post.name,
            text: new_post.text,
            created: new_post.created,
            is_published: new_post.is_published,
            author: new_post.author,
        };
        table.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let author_id = table
            .rows
            .get(&post.id)
            .map(|stored| stored.author.id)
            .ok_or(RepoError::NotFound)?;
        if name_taken(&table, author_id, &post.name, Some(post.id)) {
            return Err(RepoError::Constraint("unique_author_post".to_string()));
        }

        let stored = table.rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        stored.name = post.name;
        stored.text = post.text;
        stored.is_published = post.is_published;
        Ok(stored.clone())
    }
}

/// In-memory user table keyed by id.
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }

        let user = User {
            id: table.allocate_id(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            is_superuser: new_user.is_superuser,
            date_joined: new_user.date_joined,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }
}
