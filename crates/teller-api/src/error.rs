//! Auth endpoint errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use teller_auth::JwtError;
use teller_store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

use crate::messages::Message;
use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing required parameters")]
    MissingParameters,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user is not active")]
    UserNotActive,

    #[error("user already exists")]
    UserExist,

    #[error("store failure: {0}")]
    Store(StoreError),

    #[error("token signing failed: {0}")]
    Token(#[from] JwtError),
}

impl From<StoreError> for AuthError {
    /// A uniqueness conflict is the authoritative "already registered" signal
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(detail) => {
                warn!("Registration conflict: {}", detail);
                AuthError::UserExist
            }
            other => AuthError::Store(other),
        }
    }
}

impl AuthError {
    pub fn message(&self) -> Message {
        match self {
            AuthError::MissingParameters => Message::MissingParameters,
            AuthError::InvalidCredentials => Message::InvalidCredentials,
            AuthError::UserNotActive => Message::UserNotActive,
            AuthError::UserExist => Message::UserExist,
            AuthError::Store(_) | AuthError::Token(_) => Message::RequestDBError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingParameters
            | AuthError::InvalidCredentials
            | AuthError::UserNotActive
            | AuthError::UserExist => StatusCode::BAD_REQUEST,
            AuthError::Store(_) | AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            error!("Auth request failed: {}", self);
        }

        let message = self.message();
        let body = ErrorResponse {
            error: message.text().to_string(),
            code: Some(message.code().to_string()),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_conflict_becomes_user_exist() {
        let err = AuthError::from(StoreError::Conflict("persons.document".to_string()));

        assert!(matches!(err, AuthError::UserExist));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_is_generic_500() {
        let err = AuthError::from(StoreError::Database(DbErr::Custom("disk full".to_string())));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), Message::RequestDBError);
    }

    #[tokio::test]
    async fn test_response_body_hides_detail() {
        let err = AuthError::from(StoreError::Database(DbErr::Custom("disk full".to_string())));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.error, Message::RequestDBError.text());
        assert_eq!(error.code.as_deref(), Some("REQUEST_DB_ERROR"));
        assert!(!error.error.contains("disk full"));
    }

    #[test]
    fn test_business_rules_are_400() {
        for err in [
            AuthError::MissingParameters,
            AuthError::InvalidCredentials,
            AuthError::UserNotActive,
            AuthError::UserExist,
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }
}
