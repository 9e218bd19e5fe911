//! Persistence for persons, role types, and users
//!
//! Entities and migrations are sea-orm based. The three stores used by the
//! auth service are exposed as traits so callers can substitute doubles.

pub mod entities;
pub mod error;
pub mod migrator;
pub mod person_store;
pub mod type_person_store;
pub mod user_store;

use std::str::FromStr;

use sea_orm::{
    sqlx::{
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
        ConnectOptions as _,
    },
    ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

pub use entities::type_person::RoleKind;
pub use error::StoreError;
pub use person_store::{NewPerson, PersonRecord, PersonStore, SeaOrmPersonStore};
pub use type_person_store::{SeaOrmTypePersonStore, TypePersonStore};
pub use user_store::{SeaOrmUserStore, UserRecord, UserStore};

/// Open a database connection
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    if database_url.contains(":memory:") {
        return connect_in_memory(database_url).await;
    }

    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// In-memory SQLite lives and dies with its connection, so the pool holds
/// exactly one that is never recycled for age or idleness.
async fn connect_in_memory(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let sqlx_err = |e| DbErr::Conn(RuntimeErr::SqlxError(e));

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(sqlx_err)?
        .disable_statement_logging();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .connect_with(options)
        .await
        .map_err(sqlx_err)?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Apply all pending migrations
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}
