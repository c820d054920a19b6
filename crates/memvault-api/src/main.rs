//! HTTP API server for memvault.
//!
//! Two data routes wire the persistence layer to the best-effort index
//! mirror: `POST /add_note/` persists a note and opportunistically copies
//! it into the vector collection, `GET /get_notes/` pages through stored
//! notes newest-first.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use memvault_core::{defaults, ListNotesRequest, NewNote, Note, NoteCreate, NoteRepository};
use memvault_db::{Database, PoolConfig};
use memvault_index::{ChromaClient, NoteIndex};

/// Process configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
struct Config {
    /// Path to the SQLite database file.
    db_path: String,
    /// Bind host.
    host: String,
    /// Bind port.
    port: u16,
    /// Chroma-compatible index server endpoint.
    index_url: String,
    /// Index collection name.
    index_collection: String,
    /// API key for the third-party completion service. Optional: absence
    /// disables the dependent feature, it never fails startup.
    openai_api_key: Option<String>,
}

impl Config {
    /// Read configuration from environment variables, falling back to the
    /// centralized defaults.
    fn from_env() -> Self {
        let db_path =
            std::env::var("MEMVAULT_DB_PATH").unwrap_or_else(|_| defaults::DB_PATH.to_string());
        let host = std::env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::PORT);
        let index_url =
            std::env::var("MEMVAULT_INDEX_URL").unwrap_or_else(|_| defaults::INDEX_URL.to_string());
        let index_collection = std::env::var("MEMVAULT_INDEX_COLLECTION")
            .unwrap_or_else(|_| defaults::INDEX_COLLECTION.to_string());
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.is_empty());

        Self {
            db_path,
            host,
            port,
            index_url,
            index_collection,
            openai_api_key,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
    /// Best-effort note index; disabled when the client failed at startup.
    index: Arc<NoteIndex>,
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "MemVault API is running.",
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn add_note(
    State(state): State<AppState>,
    Json(body): Json<NoteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let note: Note = state.db.notes.insert(NewNote::from(body)).await?;

    // Best-effort mirror; the outcome is logged, never surfaced.
    let outcome = state.index.mirror(&note).await;
    debug!(
        note_id = note.id,
        outcome = ?outcome,
        "Note created"
    );

    Ok(Json(note))
}

#[derive(Debug, Deserialize)]
struct GetNotesQuery {
    /// Number of notes to skip from the newest (default 0).
    skip: Option<i64>,
    /// Maximum number of notes to return (default 100).
    limit: Option<i64>,
}

async fn get_notes(
    State(state): State<AppState>,
    Query(query): Query<GetNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let skip = query.skip.unwrap_or(defaults::LIST_SKIP);
    let limit = query.limit.unwrap_or(defaults::LIST_LIMIT);

    if skip < 0 {
        return Err(ApiError::BadRequest("skip must be non-negative".into()));
    }
    if limit < 0 {
        return Err(ApiError::BadRequest("limit must be non-negative".into()));
    }

    let notes = state.db.notes.list(ListNotesRequest { skip, limit }).await?;
    Ok(Json(notes))
}

// =============================================================================
// ROUTER & STARTUP
// =============================================================================

/// Build the application router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/add_note/", post(add_note))
        .route("/get_notes/", get(get_notes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}

/// Initialize the index client, tolerating an unavailable server by
/// disabling the mirror for the process lifetime.
async fn init_index(index_url: String, collection: String) -> NoteIndex {
    let client = ChromaClient::with_config(index_url, collection);
    match NoteIndex::connect(client).await {
        Ok(index) => index,
        Err(e) => {
            warn!(
                error = %e,
                "Index unavailable, mirror disabled for this process"
            );
            NoteIndex::disabled()
        }
    }
}

fn init_tracing() {
    // LOG_FORMAT - "json" or "text" (default: "text")
    // RUST_LOG   - standard env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memvault_api=debug,tower_http=debug".into());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env();

    if config.openai_api_key.is_some() {
        info!("Completion service API key configured");
    } else {
        info!("Completion service API key not set; completion features disabled");
    }

    // Initialize the index client first; an unavailable index server only
    // disables the mirror, never startup.
    let index = init_index(config.index_url.clone(), config.index_collection.clone()).await;
    if index.is_enabled() {
        info!(collection = %config.index_collection, "Index mirror enabled");
    }

    // Connect to database and ensure schema
    info!(db_path = %config.db_path, "Opening database");
    let db = Database::connect_with_config(&config.db_path, PoolConfig::default()).await?;
    db.ensure_schema().await?;

    let state = AppState {
        db,
        index: Arc::new(index),
    };

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    Database(memvault_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<memvault_core::Error> for ApiError {
    fn from(err: memvault_core::Error) -> Self {
        match &err {
            memvault_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            memvault_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================
