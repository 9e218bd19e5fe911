use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::cookie::{clear_session_cookie, session_cookie};
use crate::error::AuthError;
use crate::messages::Message;
use crate::models::*;
use crate::AppState;

/// Log in with email (or document number) and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookie set", body = LoginResponse),
        (status = 400, description = "Missing parameters, invalid credentials, or inactive user", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AuthError> {
    let request: LoginRequest = parse_body(&body);
    let session = state.service.login(&request).await?;

    let cookie = session_cookie(
        &state.config.cookie_name,
        &session.token,
        state.config.token_validity,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: Message::LoginSuccessfull.text().to_string(),
            token: session.token,
        }),
    ))
}

/// Register a cashier account
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing parameters or user already exists", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let request: RegisterRequest = parse_body(&body);
    state.service.register(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: Message::RegisterSuccessfull.text().to_string(),
        }),
    ))
}

/// Log out by clearing the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logout successful; session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!("Session cookie cleared");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(&state.config.cookie_name))],
        Json(MessageResponse {
            message: Message::LogoutSuccessfull.text().to_string(),
        }),
    )
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
