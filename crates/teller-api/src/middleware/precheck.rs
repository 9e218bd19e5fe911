//! Login precondition gate
//!
//! Rejects a login attempt before it reaches the handler when parameters are
//! missing or the account is unknown or inactive. The password is left to
//! the handler.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AuthError;
use crate::models::{parse_body, LoginRequest};
use crate::AppState;

/// Largest login body the gate will buffer
const MAX_BODY_BYTES: usize = 64 * 1024;

pub async fn require_active_account(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (parts, body) = request.into_parts();

    // An unreadable body is handled like an empty one
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.unwrap_or_default();
    let login: LoginRequest = parse_body(&bytes);

    state.service.check_login_precondition(&login).await?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{Method, StatusCode},
        middleware,
        routing::post,
        Router,
    };
    use teller_store::{
        connect, migrate, NewPerson, PersonStore, SeaOrmPersonStore, SeaOrmUserStore, UserStore,
    };
    use tower::ServiceExt; // For oneshot()

    use crate::config::AuthConfig;
    use crate::models::ErrorResponse;
    use crate::service::AuthService;

    // Echoes the body it receives so tests can see it survived the gate
    async fn echo(body: axum::body::Bytes) -> axum::body::Bytes {
        body
    }

    async fn gated_app(active: bool) -> Router {
        let db = connect("sqlite::memory:").await.unwrap();
        migrate(&db).await.unwrap();

        let config = AuthConfig::new("precheck-secret").with_hash_cost(1);
        let service = AuthService::from_database(db.clone(), &config).unwrap();

        let person = SeaOrmPersonStore::new(db.clone())
            .create_person(
                NewPerson {
                    fullname: "Luis Perez".to_string(),
                    address: "Carrera 7".to_string(),
                    document: "5550".to_string(),
                    type_document: "CC".to_string(),
                    email: "luis@example.com".to_string(),
                    phone_number: "3100000000".to_string(),
                },
                vec![],
            )
            .await
            .unwrap();

        let users = SeaOrmUserStore::new(
            db.clone(),
            Arc::new(teller_auth::Argon2Hasher::new(1).unwrap()),
        );
        let user = users.create_user("pw", person.person.id).await.unwrap();
        if !active {
            users.set_status(user.id, false).await.unwrap();
        }

        let state = Arc::new(AppState { service, config });

        Router::new()
            .route("/login", post(echo))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_active_account,
            ))
            .with_state(state)
    }

    fn login(body: &str) -> Request {
        axum::http::Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_code(response: Response) -> Option<String> {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        error.code
    }

    #[tokio::test]
    async fn test_active_account_passes_body_through() {
        let app = gated_app(true).await;
        let body = r#"{"email":"luis@example.com","password":"anything"}"#;

        let response = app.oneshot(login(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&echoed[..], body.as_bytes());
    }

    #[tokio::test]
    async fn test_inactive_account_is_rejected() {
        let app = gated_app(false).await;

        let response = app
            .oneshot(login(r#"{"email":"luis@example.com","password":"pw"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await.as_deref(), Some("USER_NOT_ACTIVE"));
    }

    #[tokio::test]
    async fn test_unknown_account_is_rejected() {
        let app = gated_app(true).await;

        let response = app
            .oneshot(login(r#"{"email":"nobody@example.com","password":"pw"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await.as_deref(), Some("USER_NOT_ACTIVE"));
    }

    #[tokio::test]
    async fn test_missing_parameters_are_rejected() {
        let app = gated_app(true).await;

        let response = app.oneshot(login("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_code(response).await.as_deref(),
            Some("MISSING_PARAMETERS")
        );
    }
}
