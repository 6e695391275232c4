use anyhow::Result;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub type DatabasePool = SqlitePool;

/// Creates the SQLite connection pool.
///
/// WAL mode lets readers proceed while a write transaction is open; foreign
/// keys must be switched on per connection because SQLite ships with them
/// disabled.
pub async fn setup_database(database_url: &str, max_connections: u32) -> Result<DatabasePool> {
    info!("Connecting to database: {}", database_url);

    // Writers queue on the busy handler for up to this long before a lock
    // contest surfaces as an error.
    let options = SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
