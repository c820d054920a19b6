//! # memvault-index
//!
//! Best-effort secondary index mirror for memvault.
//!
//! On note creation the API layer hands the persisted record to
//! [`NoteIndex::mirror`], which copies the content and `{sql_id,
//! timestamp}` metadata into a Chroma-compatible vector collection for
//! future semantic search. The index is non-authoritative: a note can
//! exist in the primary store and not here, and no repair ever runs.

pub mod chroma;

pub use chroma::{ChromaClient, MirrorOutcome, NoteIndex};
