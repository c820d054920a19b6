//! Repository traits shared between the HTTP layer and storage backends.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ListNotesRequest, NewNote, Note};

/// Repository for note persistence.
///
/// Notes are create-and-read only: no update or delete exists in this
/// system.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, assigning the server-side timestamp when the
    /// input carries none, and return the persisted record including its
    /// assigned id.
    async fn insert(&self, note: NewNote) -> Result<Note>;

    /// List a page of notes, newest first.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>>;
}
