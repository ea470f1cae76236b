//! # DocVault DB
//!
//! Database pool and migrations for the DocVault API.
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary with [`sqlx::migrate!`], so a deployed binary can bring an
//! empty database up to date on startup.
//!
//! # Example
//!
//! ```ignore
//! use docvault_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

fn max_connections() -> u32 {
    env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

fn database_url() -> Result<String, sqlx::Error> {
    env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))
}

/// Connects to PostgreSQL using `DATABASE_URL`.
///
/// The pool size comes from `DATABASE_MAX_CONNECTIONS` (default 10).
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset or the first connection cannot be made.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let url = database_url()?;
    let max = max_connections();

    let pool = PgPoolOptions::new()
        .max_connections(max)
        .connect(&url)
        .await?;

    tracing::info!(max_connections = max, "database pool ready");
    Ok(pool)
}

/// Builds a pool without opening a connection.
///
/// Connections are established on first use, which lets request paths that
/// never reach the database run without one.
pub fn init_lazy_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections())
        .connect_lazy(url)
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` escaped.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
