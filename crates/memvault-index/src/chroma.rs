//! Chroma-compatible vector index client.
//!
//! The index is a derived, non-authoritative mirror of note content kept
//! for future similarity search. Every write is best-effort: failures are
//! recorded as a [`MirrorOutcome`] and logged, never propagated to the
//! caller of the primary path.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use memvault_core::{defaults, Error, Note, Result};

/// Default index server endpoint.
pub const DEFAULT_INDEX_URL: &str = defaults::INDEX_URL;

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = defaults::INDEX_COLLECTION;

/// Timeout for index requests (seconds).
pub const INDEX_TIMEOUT_SECS: u64 = defaults::INDEX_TIMEOUT_SECS;

/// Outcome of one mirror attempt.
///
/// Recorded for observability only; the primary creation path never
/// inspects it beyond logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// The entry was written to the index collection.
    Indexed,
    /// The mirror is disabled for this process; nothing was attempted.
    Skipped,
    /// The write was attempted and failed.
    Failed(String),
}

/// HTTP client for a Chroma-compatible index server.
pub struct ChromaClient {
    client: Client,
    base_url: String,
    collection: String,
}

#[derive(Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct AddEntriesRequest {
    ids: Vec<String>,
    documents: Vec<String>,
    metadatas: Vec<EntryMetadata>,
}

#[derive(Debug, Serialize)]
struct EntryMetadata {
    sql_id: i64,
    timestamp: String,
}

impl ChromaClient {
    /// Create a new index client with default settings.
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_INDEX_URL.to_string(),
            DEFAULT_COLLECTION.to_string(),
        )
    }

    /// Create a new index client with custom configuration.
    pub fn with_config(base_url: String, collection: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(INDEX_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "index",
            component = "chroma",
            url = %base_url,
            collection = %collection,
            "Initializing index client"
        );

        Self {
            client,
            base_url,
            collection,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("MEMVAULT_INDEX_URL")
            .unwrap_or_else(|_| DEFAULT_INDEX_URL.to_string());
        let collection = std::env::var("MEMVAULT_INDEX_COLLECTION")
            .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());

        Self::with_config(base_url, collection)
    }

    /// The configured collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The configured server endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the collection on the server, creating it if absent, and
    /// return its id.
    pub async fn get_or_create_collection(&self) -> Result<String> {
        let request = CreateCollectionRequest {
            name: &self.collection,
            get_or_create: true,
        };

        let response = self
            .client
            .post(format!("{}/api/v1/collections", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Index(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Index(format!(
                "Index server returned {}: {}",
                status, body
            )));
        }

        let collection: CollectionResponse = response
            .json()
            .await
            .map_err(|e| Error::Index(format!("Failed to parse response: {}", e)))?;

        Ok(collection.id)
    }

    /// Add one entry to the collection.
    async fn add(&self, collection_id: &str, entry: AddEntriesRequest) -> Result<()> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/collections/{}/add",
                self.base_url, collection_id
            ))
            .json(&entry)
            .send()
            .await
            .map_err(|e| Error::Index(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Index(format!(
                "Index server returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

impl Default for ChromaClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the index entry for a note: keyed by the stringified id, the
/// content as document body, `{sql_id, timestamp}` as metadata. The
/// document is raw text; embedding is left to the index server.
fn build_entry(note: &Note) -> AddEntriesRequest {
    AddEntriesRequest {
        ids: vec![note.id.to_string()],
        documents: vec![note.content.clone()],
        metadatas: vec![EntryMetadata {
            sql_id: note.id,
            timestamp: note.timestamp.to_rfc3339(),
        }],
    }
}

/// Handle to the note index: either connected to a collection or disabled
/// for the process lifetime.
pub struct NoteIndex {
    inner: Option<Connected>,
}

struct Connected {
    client: ChromaClient,
    collection_id: String,
}

impl NoteIndex {
    /// Resolve the collection and return a connected index handle.
    ///
    /// Callers that want the degraded mode fall back to [`Self::disabled`]
    /// when this errors.
    pub async fn connect(client: ChromaClient) -> Result<Self> {
        let collection_id = client.get_or_create_collection().await?;
        info!(
            subsystem = "index",
            component = "chroma",
            op = "connect",
            collection = %client.collection(),
            collection_id = %collection_id,
            "Index collection ready"
        );
        Ok(Self {
            inner: Some(Connected {
                client,
                collection_id,
            }),
        })
    }

    /// A permanently disabled index: every mirror attempt is a no-op.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether the mirror is active for this process.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Best-effort mirror of a freshly created note.
    ///
    /// Never fails the caller: errors are logged and folded into the
    /// returned outcome.
    #[instrument(skip(self, note), fields(subsystem = "index", component = "chroma", op = "mirror", note_id = note.id))]
    pub async fn mirror(&self, note: &Note) -> MirrorOutcome {
        let Some(connected) = &self.inner else {
            debug!("Index disabled, mirror skipped");
            return MirrorOutcome::Skipped;
        };

        let start = Instant::now();
        let entry = build_entry(note);
        match connected.client.add(&connected.collection_id, entry).await {
            Ok(()) => {
                debug!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Note mirrored to index"
                );
                MirrorOutcome::Indexed
            }
            Err(e) => {
                warn!(
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Failed to mirror note to index"
                );
                MirrorOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_note() -> Note {
        Note {
            id: 5,
            content: "index me".to_string(),
            timestamp: "2026-08-07T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_entry_is_keyed_by_stringified_id() {
        let entry = build_entry(&sample_note());
        assert_eq!(entry.ids, vec!["5".to_string()]);
    }

    #[test]
    fn test_entry_carries_content_and_metadata() {
        let entry = build_entry(&sample_note());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["documents"][0], "index me");
        assert_eq!(json["metadatas"][0]["sql_id"], 5);
        assert_eq!(json["metadatas"][0]["timestamp"], "2026-08-07T12:00:00+00:00");
    }

    #[test]
    fn test_with_config_keeps_settings() {
        let client = ChromaClient::with_config(
            "http://index.example:9000".to_string(),
            "my_notes".to_string(),
        );
        assert_eq!(client.base_url(), "http://index.example:9000");
        assert_eq!(client.collection(), "my_notes");
    }

    #[tokio::test]
    async fn test_disabled_index_skips_mirror() {
        let index = NoteIndex::disabled();
        assert!(!index.is_enabled());

        let outcome = index.mirror(&sample_note()).await;
        assert_eq!(outcome, MirrorOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_mirror_of_note_with_now_timestamp() {
        // Disabled path must not touch the note at all.
        let index = NoteIndex::disabled();
        let note = Note {
            id: 1,
            content: String::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(index.mirror(&note).await, MirrorOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_mirror_failure_is_contained() {
        // Port 1 refuses connections immediately: the write fails but the
        // outcome carries the error instead of propagating it.
        let client =
            ChromaClient::with_config("http://127.0.0.1:1".to_string(), "notes".to_string());
        let index = NoteIndex {
            inner: Some(Connected {
                client,
                collection_id: "test-collection".to_string(),
            }),
        };

        match index.mirror(&sample_note()).await {
            MirrorOutcome::Failed(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_server_errors() {
        let client =
            ChromaClient::with_config("http://127.0.0.1:1".to_string(), "notes".to_string());
        assert!(NoteIndex::connect(client).await.is_err());
    }
}
