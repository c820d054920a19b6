//! # memvault-db
//!
//! SQLite persistence layer for memvault.
//!
//! This crate provides:
//! - Connection pool management for the single-file database
//! - Idempotent schema creation at startup
//! - The note repository implementation
//!
//! ## Example
//!
//! ```rust,ignore
//! use memvault_db::Database;
//! use memvault_core::{NewNote, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("notes.db").await?;
//!     db.ensure_schema().await?;
//!
//!     let note = db.notes.insert(NewNote {
//!         content: "Hello, world!".to_string(),
//!         timestamp: None,
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod schema;

// Re-export core types
pub use memvault_core::*;

pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use schema::ensure_schema;

use std::path::Path;

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Note repository.
    pub notes: SqliteNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by opening the given database file.
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self> {
        let pool = create_pool(db_path).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(
        db_path: impl AsRef<Path>,
        config: PoolConfig,
    ) -> Result<Self> {
        let pool = create_pool_with_config(db_path, config).await?;
        Ok(Self::new(pool))
    }

    /// Ensure the schema exists (idempotent, called at startup).
    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.pool).await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}
