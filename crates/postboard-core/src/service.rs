//! The five post operations, independent of any transport.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{Caller, CallerIdentity, NewPost, Post};
use crate::error::{DomainError, RepoError};
use crate::policy::can_modify;
use crate::ports::PostRepository;
use crate::validation::{
    MSG_DUPLICATE_NAME, NON_FIELD_ERRORS, PostLimits, ValidationErrors, validate_create,
    validate_update,
};

pub const MSG_NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const MSG_NOT_OWNER: &str = "You do not have permission to modify another author's post.";

/// Post use cases: list, create, retrieve, update, delete.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    limits: PostLimits,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, limits: PostLimits) -> Self {
        Self { posts, limits }
    }

    /// Published posts, newest first. Open to everyone.
    pub async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_published().await?)
    }

    /// Reject callers that may not create posts, before any payload is read.
    pub fn authorize_create<'c>(
        &self,
        caller: &'c Caller,
    ) -> Result<&'c CallerIdentity, DomainError> {
        caller
            .identity()
            .ok_or_else(|| DomainError::PermissionDenied(MSG_NOT_AUTHENTICATED.to_string()))
    }

    /// Create a post owned by the caller.
    ///
    /// Anonymous callers are rejected before the payload is looked at. Any
    /// `author` in the payload is ignored.
    pub async fn create(
        &self,
        caller: &Caller,
        fields: &Map<String, Value>,
    ) -> Result<Post, DomainError> {
        let identity = self.authorize_create(caller)?;

        let draft = validate_create(fields, &self.limits).map_err(DomainError::Validation)?;
        self.ensure_name_available(identity.user_id, &draft.name, None)
            .await?;

        let new_post = NewPost::new(
            identity.as_author(),
            draft.name,
            draft.text,
            draft.is_published,
        );
        self.posts.insert(new_post).await.map_err(write_error)
    }

    /// Any post by id, published or not, for any caller.
    pub async fn retrieve(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Load a post the caller may modify. Not-found wins over permission.
    pub async fn find_modifiable(&self, caller: &Caller, id: i64) -> Result<Post, DomainError> {
        let current = self.retrieve(id).await?;
        authorize(caller, &current)?;
        Ok(current)
    }

    /// Merge the supplied fields into a post the caller may modify.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        fields: &Map<String, Value>,
    ) -> Result<Post, DomainError> {
        let current = self.find_modifiable(caller, id).await?;
        self.apply_update(current, fields).await
    }

    /// Validate and write changes to a post already cleared by
    /// [`PostService::find_modifiable`].
    pub async fn apply_update(
        &self,
        current: Post,
        fields: &Map<String, Value>,
    ) -> Result<Post, DomainError> {
        let id = current.id;
        let merged =
            validate_update(&current, fields, &self.limits).map_err(DomainError::Validation)?;
        if merged.name != current.name {
            self.ensure_name_available(merged.author.id, &merged.name, Some(id))
                .await?;
        }

        match self.posts.update(merged).await {
            Err(RepoError::NotFound) => Err(not_found(id)),
            result => result.map_err(write_error),
        }
    }

    /// Remove a post the caller may modify.
    pub async fn delete(&self, caller: &Caller, id: i64) -> Result<(), DomainError> {
        self.find_modifiable(caller, id).await?;

        match self.posts.delete(id).await {
            Err(RepoError::NotFound) => Err(not_found(id)),
            result => Ok(result?),
        }
    }

    async fn ensure_name_available(
        &self,
        author_id: i64,
        name: &str,
        except: Option<i64>,
    ) -> Result<(), DomainError> {
        let existing = self.posts.find_by_author_and_name(author_id, name).await?;
        match existing {
            Some(post) if Some(post.id) != except => Err(duplicate_name()),
            _ => Ok(()),
        }
    }
}

fn authorize(caller: &Caller, post: &Post) -> Result<(), DomainError> {
    if can_modify(caller, post) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied(MSG_NOT_OWNER.to_string()))
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn duplicate_name() -> DomainError {
    DomainError::Validation(ValidationErrors::single(
        NON_FIELD_ERRORS,
        MSG_DUPLICATE_NAME,
    ))
}

// A concurrent writer can still win the race past the pre-check; the
// unique index has the final word.
fn write_error(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => duplicate_name(),
        other => other.into(),
    }
}
