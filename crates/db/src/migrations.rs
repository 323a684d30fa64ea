use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// True once the workflow's baseline tables exist; used by readiness checks.
pub async fn baseline_ready(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let table_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master \
         WHERE type = 'table' AND name IN ('assignments', 'submissions')",
    )
    .fetch_one(pool)
    .await?;

    Ok(table_count == 2)
}
