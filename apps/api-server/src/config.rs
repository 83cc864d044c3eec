//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use postboard_core::validation::{DEFAULT_NAME_MAX_LENGTH, PostLimits};
use postboard_infra::DatabaseConfig;

/// Largest request body accepted, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Credentials for the superuser created at startup.
#[derive(Clone)]
pub struct SuperuserConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SuperuserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperuserConfig")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub post_limits: PostLimits,
    pub body_limit: usize,
    pub superuser: Option<SuperuserConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            bootstrap_schema: flag_var("DB_BOOTSTRAP_SCHEMA").unwrap_or(true),
        });

        let superuser = match (
            env::var("SUPERUSER_USERNAME"),
            env::var("SUPERUSER_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() => {
                Some(SuperuserConfig { username, password })
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            post_limits: PostLimits {
                name_max_length: parse_var("POST_NAME_MAX_LENGTH")
                    .unwrap_or(DEFAULT_NAME_MAX_LENGTH),
            },
            body_limit: parse_var("BODY_LIMIT_BYTES").unwrap_or(DEFAULT_BODY_LIMIT),
            superuser,
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn flag_var(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
}
