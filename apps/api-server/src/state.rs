//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostService;
use postboard_core::domain::NewUser;
use postboard_core::ports::{PasswordService, PostRepository, UserRepository};
use postboard_core::validation::PostLimits;
use postboard_infra::{Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use postboard_infra::database::{connect, schema};
#[cfg(feature = "postgres")]
use postboard_infra::{PostgresPostRepository, PostgresUserRepository};

use crate::config::{AppConfig, SuperuserConfig};

/// Errors that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Database unavailable: {0}")]
    Database(String),

    #[error("Superuser bootstrap failed: {0}")]
    Superuser(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub post_service: PostService,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Assemble state from already-built repositories.
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        limits: PostLimits,
    ) -> Self {
        Self {
            post_service: PostService::new(posts, limits),
            users,
            passwords,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let (posts, users) = repositories(config).await?;
        let state = Self::from_parts(
            posts,
            users,
            Arc::new(Argon2PasswordService::new()),
            config.post_limits,
        );

        if let Some(superuser) = &config.superuser {
            state.ensure_superuser(superuser).await?;
        }

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Create the configured superuser unless the username is already taken.
    pub async fn ensure_superuser(&self, superuser: &SuperuserConfig) -> Result<(), StartupError> {
        let existing = self
            .users
            .find_by_username(&superuser.username)
            .await
            .map_err(|e| StartupError::Superuser(e.to_string()))?;
        if existing.is_some() {
            tracing::debug!(username = %superuser.username, "Superuser already exists");
            return Ok(());
        }

        let password_hash = self
            .passwords
            .hash(&superuser.password)
            .map_err(|e| StartupError::Superuser(e.to_string()))?;
        let user = self
            .users
            .insert(NewUser::new(superuser.username.clone(), password_hash, true))
            .await
            .map_err(|e| StartupError::Superuser(e.to_string()))?;

        tracing::info!(user_id = user.id, username = %user.username, "Superuser created");
        Ok(())
    }
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn UserRepository>);

#[cfg(feature = "postgres")]
async fn repositories(config: &AppConfig) -> Result<Repositories, StartupError> {
    let Some(db_config) = &config.database else {
        return Ok(in_memory());
    };

    let db = connect(db_config)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if db_config.bootstrap_schema {
        schema::ensure_schema(&db)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
    }

    Ok((
        Arc::new(PostgresPostRepository::new(db.clone())),
        Arc::new(PostgresUserRepository::new(db)),
    ))
}

#[cfg(not(feature = "postgres"))]
async fn repositories(config: &AppConfig) -> Result<Repositories, StartupError> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL is set but the postgres feature is disabled");
    }
    Ok(in_memory())
}

fn in_memory() -> Repositories {
    tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}
