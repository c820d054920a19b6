//! Idempotent schema creation, run once at startup.

use sqlx::SqlitePool;
use tracing::info;

use memvault_core::{Error, Result};

/// Ensure the note table exists (create-if-absent).
///
/// Safe to call on every startup; existing data is untouched.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_timestamp ON notes(timestamp)")
        .execute(pool)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = "database",
        component = "schema",
        op = "ensure",
        db_table = "notes",
        "Schema ensured"
    );
    Ok(())
}
