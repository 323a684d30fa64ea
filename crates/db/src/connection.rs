use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use assigndrop_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Opens the SQLite pool the workflow engine runs against.
///
/// Foreign keys back the submission -> assignment reference, WAL keeps
/// concurrent submit/view invocations from blocking each other, and the busy
/// timeout absorbs writer contention instead of surfacing SQLITE_BUSY.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&config.url)
        .await
}

#[cfg(test)]
pub(crate) fn test_database_config(url: &str) -> DatabaseConfig {
    DatabaseConfig { url: url.to_string(), max_connections: 1, timeout_secs: 30 }
}
