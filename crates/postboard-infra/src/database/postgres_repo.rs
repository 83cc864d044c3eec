//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Select,
    SelectTwo,
};

use postboard_core::domain::{NewPost, NewUser, Post, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, read_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            is_superuser: Set(user.is_superuser),
            date_joined: Set(user.date_joined.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(write_error)?;

        tracing::debug!(user_id = model.id, "User inserted");
        Ok(model.into())
    }
}

/// PostgreSQL post repository. Every read joins the author row.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn with_author(select: Select<PostEntity>) -> SelectTwo<PostEntity, UserEntity> {
        select.find_also_related(UserEntity)
    }
}

fn joined_post(row: (post::Model, Option<user::Model>)) -> Result<Post, RepoError> {
    let (post, author) = row;
    let author = author.ok_or_else(|| {
        RepoError::Query(format!("post {} references a missing author", post.id))
    })?;
    Ok(post.into_post((&author).into()))
}

#[async_trait]
impl BaseRepository<Post, i64> for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let row = Self::with_author(PostEntity::find_by_id(id))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        row.map(joined_post).transpose()
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = Self::with_author(PostEntity::find())
            .filter(post::Column::IsPublished.eq(true))
            .order_by_desc(post::Column::Created)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(joined_post).collect()
    }

    async fn find_by_author_and_name(
        &self,
        author_id: i64,
        name: &str,
    ) -> Result<Option<Post>, RepoError> {
        let row = Self::with_author(PostEntity::find())
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        row.map(joined_post).transpose()
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            name: Set(post.name),
            text: Set(post.text),
            created: Set(post.created.into()),
            is_published: Set(post.is_published),
            author_id: Set(post.author.id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(write_error)?;

        tracing::debug!(post_id = model.id, author_id = model.author_id, "Post inserted");
        Ok(model.into_post(post.author))
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Unchanged(post.id),
            name: Set(post.name),
            text: Set(post.text),
            is_published: Set(post.is_published),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        tracing::debug!(post_id = model.id, "Post updated");
        Ok(model.into_post(post.author))
    }
}
