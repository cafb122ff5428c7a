//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, MessageView, SessionResponse,
    SessionSnapshotResponse, SessionView,
};
use super::AppState;
use crate::session::ChatSession;
use crate::state_machine::TransitionError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the widget page
        .route("/", get(serve_widget))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session creation
        .route("/api/sessions/new", post(create_session))
        // Session snapshot
        .route("/api/sessions/:id", get(get_session))
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // Chat submission
        .route("/api/sessions/:id/chat", post(send_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Widget Page
// ============================================================

/// Serve the chat widget page
async fn serve_widget() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - widget page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.sessions.create().await;
    tracing::info!(session_id = %session.id(), "Session created");

    Json(SessionResponse {
        session: SessionView::from(session.context()),
    })
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshotResponse>, AppError> {
    let session = lookup(&state, &id).await?;
    Ok(Json(snapshot_response(&session)))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = lookup(&state, &id).await?;

    // Subscribe before snapshotting so no event falls between the two;
    // the widget dedups messages by id.
    let events_rx = session.subscribe();
    let init = snapshot_response(&session);

    Ok(sse_stream(init, events_rx))
}

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = lookup(&state, &id).await?;
    session.submit(&req.text)?;

    Ok(Json(ChatResponse { accepted: true }))
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

async fn lookup(state: &AppState, id: &str) -> Result<std::sync::Arc<ChatSession>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No session with id {id}")))
}

fn snapshot_response(session: &ChatSession) -> SessionSnapshotResponse {
    let snapshot = session.snapshot();
    SessionSnapshotResponse {
        session: SessionView::from(session.context()),
        messages: snapshot.messages.iter().map(MessageView::from).collect(),
        pending: snapshot.pending,
        error: snapshot.error,
    }
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Conflict(String),
    NotFound(String),
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::ResponderBusy => AppError::Conflict(e.to_string()),
            TransitionError::EmptyMessage | TransitionError::InvalidTransition(_) => {
                AppError::BadRequest(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
