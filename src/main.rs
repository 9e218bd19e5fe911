//! Teller - cashier registration and session login service
//!
//! Connects to the database, applies migrations, and serves the auth API.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use teller_api::{ApiServer, ApiServerConfig, AuthConfig};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Teller - cashier registration and session login
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Teller - cashier registration and session login service")]
#[command(version = env!("GIT_TAG"))]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, env = "TELLER_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Database connection URL (sqlite or postgres)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://teller.db?mode=rwc")]
    database_url: String,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Argon2 time cost for new password hashes
    #[arg(long, env = "SALT", default_value_t = teller_api::config::DEFAULT_HASH_COST)]
    hash_cost: u32,

    /// Reject logins for unknown or inactive accounts before the handler runs
    #[arg(long, env = "TELLER_LOGIN_PRECHECK")]
    login_precheck: bool,

    /// Allow cross-origin requests from localhost (development)
    #[arg(long)]
    cors: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!(
        "Teller {} ({}, built {})",
        env!("GIT_TAG"),
        env!("GIT_HASH"),
        env!("BUILD_TIME")
    );

    if cli.jwt_secret.len() < 32 {
        warn!("JWT secret is shorter than 32 bytes");
    }

    let db = teller_store::connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    teller_store::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    let auth_config = AuthConfig::new(cli.jwt_secret).with_hash_cost(cli.hash_cost);
    let server_config = ApiServerConfig {
        bind_addr: cli.bind,
        enable_cors: cli.cors,
        login_precheck: cli.login_precheck,
    };

    let server = ApiServer::new(server_config, auth_config, db)
        .context("Failed to create API server")?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    tokio::select! {
        _ = &mut ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        result = server.start() => {
            if let Err(e) = result {
                error!("API server error: {:#}", e);
                return Err(e);
            }
        }
    }

    info!("Teller stopped");
    Ok(())
}
