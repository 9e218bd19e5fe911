//! Auth service configuration

use chrono::Duration;
pub use teller_auth::{DEFAULT_HASH_COST, DEFAULT_TOKEN_VALIDITY_MINUTES};

/// Cookie that carries the session token
pub const SESSION_COOKIE: &str = "token";

/// Settings read once at startup and handed to the auth service
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// Argon2 cost factor for new password hashes
    pub hash_cost: u32,
    /// Lifetime of an issued session token
    pub token_validity: Duration,
    /// Name of the session cookie set at login and cleared at logout
    pub cookie_name: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            hash_cost: DEFAULT_HASH_COST,
            token_validity: Duration::minutes(DEFAULT_TOKEN_VALIDITY_MINUTES),
            cookie_name: SESSION_COOKIE.to_string(),
        }
    }

    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }
}
