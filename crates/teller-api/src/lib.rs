//! HTTP API for cashier registration, login, and logout

pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod service;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::DatabaseConnection;

pub use config::AuthConfig;
pub use error::AuthError;
pub use messages::Message;
pub use service::{AuthService, Session};

/// Application state shared across handlers
pub struct AppState {
    pub service: AuthService,
    pub config: AuthConfig,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Teller API",
        version = "0.1.0",
        description = "Cashier registration and session login"
    ),
    paths(
        handlers::login,
        handlers::register,
        handlers::logout,
        handlers::health_check,
    ),
    components(
        schemas(
            models::LoginRequest,
            models::LoginResponse,
            models::RegisterRequest,
            models::MessageResponse,
            models::ErrorResponse,
            models::HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, and logout"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS for local development origins
    pub enable_cors: bool,
    /// Run the active-account gate in front of `POST /login`
    pub login_precheck: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            enable_cors: false,
            login_precheck: false,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a server backed by sea-orm stores on `db`
    pub fn new(
        config: ApiServerConfig,
        auth_config: AuthConfig,
        db: DatabaseConnection,
    ) -> Result<Self, anyhow::Error> {
        let service = AuthService::from_database(db, &auth_config)?;
        Ok(Self::with_service(config, auth_config, service))
    }

    /// Create a server around an already wired service
    pub fn with_service(
        config: ApiServerConfig,
        auth_config: AuthConfig,
        service: AuthService,
    ) -> Self {
        let state = Arc::new(AppState {
            service,
            config: auth_config,
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let mut login_router = Router::new().route("/login", post(handlers::login));

        if self.config.login_precheck {
            login_router = login_router.route_layer(axum_middleware::from_fn_with_state(
                self.state.clone(),
                middleware::require_active_account,
            ));
        }

        let api_router = Router::new()
            .route("/register", post(handlers::register))
            .route("/logout", post(handlers::logout))
            .route("/health", get(handlers::health_check))
            .merge(login_router)
            .with_state(self.state.clone());

        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            use tower_http::cors::AllowOrigin;

            // Credentialed cookies rule out a wildcard origin
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::COOKIE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                        || origin_str.starts_with("https://localhost:")
                        || origin_str.starts_with("https://127.0.0.1:")
                }));

            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        if self.config.login_precheck {
            info!("Login precondition gate enabled");
        }
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}
