//! Note repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use memvault_core::{Error, ListNotesRequest, NewNote, Note, NoteRepository, Result};

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: SqliteRow) -> Note {
    let timestamp: DateTime<Utc> = row.get("timestamp");
    Note {
        id: row.get("id"),
        content: row.get("content"),
        timestamp,
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Note> {
        let timestamp = note.timestamp.unwrap_or_else(Utc::now);

        let result = sqlx::query("INSERT INTO notes (content, timestamp) VALUES (?, ?)")
            .bind(&note.content)
            .bind(timestamp)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let id = result.last_insert_rowid();
        debug!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = id,
            "Note inserted"
        );

        Ok(Note {
            id,
            content: note.content,
            timestamp,
        })
    }

    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, content, timestamp FROM notes \
             ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(req.limit)
        .bind(req.skip)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let notes: Vec<Note> = rows.into_iter().map(map_row_to_note).collect();
        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            skip = req.skip,
            limit = req.limit,
            "Notes listed"
        );
        Ok(notes)
    }
}
