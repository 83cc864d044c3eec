use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post::Author;

/// User entity - an account that can author posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// The author view of this user, as embedded in posts.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user with the join date set to now.
    pub fn new(username: String, password_hash: String, is_superuser: bool) -> Self {
        Self {
            username,
            password_hash,
            is_superuser,
            date_joined: Utc::now(),
        }
    }
}
