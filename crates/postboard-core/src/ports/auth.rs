//! Authentication ports.

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username/password.")]
    InvalidCredentials,

    #[error("Invalid basic header: {0}")]
    MalformedHeader(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Credential lookup failed: {0}")]
    Lookup(String),
}
