//! Core data models for memvault.
//!
//! These types are shared across all memvault crates and represent the
//! note entity together with the shapes accepted and returned over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A persisted note.
///
/// This is both the storage record and the response shape: `id` is
/// assigned by the database on insert and `timestamp` is set once at
/// creation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The creation request body: content only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteCreate {
    pub content: String,
}

/// Repository input for creating a note.
///
/// `timestamp` is almost always `None`; the repository assigns the server
/// clock (UTC) at insert time when it is absent.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<NoteCreate> for NewNote {
    fn from(req: NoteCreate) -> Self {
        Self {
            content: req.content,
            timestamp: None,
        }
    }
}

// =============================================================================
// LISTING
// =============================================================================

/// Pagination window for listing notes.
#[derive(Debug, Clone, Copy)]
pub struct ListNotesRequest {
    /// Number of notes to skip from the newest.
    pub skip: i64,
    /// Maximum number of notes to return.
    pub limit: i64,
}
