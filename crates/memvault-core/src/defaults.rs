//! Centralized default constants for memvault.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default number of notes skipped when listing.
pub const LIST_SKIP: i64 = 0;

/// Default maximum number of notes returned when listing.
pub const LIST_LIMIT: i64 = 100;

// =============================================================================
// DATABASE
// =============================================================================

/// Default SQLite database file, relative to the working directory.
pub const DB_PATH: &str = "notes.db";

// =============================================================================
// SECONDARY INDEX
// =============================================================================

/// Default base URL of the Chroma-compatible index server.
pub const INDEX_URL: &str = "http://localhost:8001";

/// Default index collection for note content.
pub const INDEX_COLLECTION: &str = "memory_notes";

/// Timeout for index requests (seconds).
pub const INDEX_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// HTTP
// =============================================================================

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default bind port.
pub const PORT: u16 = 8000;
