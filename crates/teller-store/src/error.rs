//! Store error type

use sea_orm::{DbErr, SqlErr};
use teller_auth::PasswordError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A uniqueness constraint rejected the write
    #[error("Conflicting record: {0}")]
    Conflict(String),

    /// The role catalog has no entry with this description
    #[error("Role type '{0}' not found")]
    RoleNotFound(String),

    #[error("Person {0} not found")]
    PersonNotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordError),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
            _ => StoreError::Database(err),
        }
    }
}
