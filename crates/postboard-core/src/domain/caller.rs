use super::post::Author;
use super::user::User;

/// Resolved identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: i64,
    pub username: String,
    pub is_superuser: bool,
}

impl CallerIdentity {
    pub fn as_author(&self) -> Author {
        Author {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

impl From<&User> for CallerIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_superuser: user.is_superuser,
        }
    }
}

/// Whoever is making the request, possibly nobody in particular.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(CallerIdentity),
}

impl Caller {
    pub fn identity(&self) -> Option<&CallerIdentity> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(identity) => Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}
