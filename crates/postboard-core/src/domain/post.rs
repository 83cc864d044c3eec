use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user a post belongs to, as far as posts are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Post entity - a named text entry owned by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub created: DateTime<Utc>,
    pub is_published: bool,
    pub author: Author,
}

impl Post {
    /// Overlay the supplied fields, keeping everything else as stored.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(is_published) = changes.is_published {
            self.is_published = is_published;
        }
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author.id == user_id
    }
}

/// A post that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub name: String,
    pub text: String,
    pub created: DateTime<Utc>,
    pub is_published: bool,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(author: Author, name: String, text: String, is_published: bool) -> Self {
        Self {
            author,
            name,
            text,
            created: Utc::now(),
            is_published,
        }
    }
}

/// Client-writable fields of a post. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub is_published: Option<bool>,
}
