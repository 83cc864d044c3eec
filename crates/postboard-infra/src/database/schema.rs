//! Idempotent schema bootstrap derived from the entities.

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::Entity as UserEntity;

/// Name of the unique index over `(author_id, name)`.
pub const UNIQUE_AUTHOR_POST: &str = "unique_author_post";

/// Create the `users` and `posts` tables and the per-author name index
/// when they do not exist yet.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut users = schema.create_table_from_entity(UserEntity);
    users.if_not_exists();
    db.execute(backend.build(&users)).await?;

    let mut posts = schema.create_table_from_entity(PostEntity);
    posts.if_not_exists();
    db.execute(backend.build(&posts)).await?;

    let unique_author_post = Index::create()
        .name(UNIQUE_AUTHOR_POST)
        .table(PostEntity)
        .col(post::Column::AuthorId)
        .col(post::Column::Name)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&unique_author_post)).await?;

    tracing::info!("Database schema ensured");
    Ok(())
}
