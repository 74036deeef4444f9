use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::{DatabaseConfig, MEMORY_DB_PATH};

pub mod models;
pub mod todos;

pub use todos::TodoStore;

pub type DbPool = SqlitePool;

const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title       VARCHAR(255) NOT NULL DEFAULT '',
    description VARCHAR(512) NOT NULL DEFAULT '',
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

pub async fn init(cfg: &DatabaseConfig) -> Result<DbPool> {
    let pool = if cfg.path == MEMORY_DB_PATH {
        // Every in-memory connection is its own database: pin the pool to one
        // connection that is never recycled.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(&cfg.path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .busy_timeout(Duration::from_secs(5)),
            )
            .await?
    };

    create_table(&pool).await?;

    tracing::info!(
        "Database connected: {} (max {} connections)",
        cfg.path,
        pool.options().get_max_connections()
    );
    Ok(pool)
}

/// Idempotent: safe to run on every start.
pub async fn create_table(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;
    tracing::info!("Table `todos` ready");
    Ok(())
}
