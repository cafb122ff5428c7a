//! Server-Sent Events support

use super::types::{MessageView, SessionSnapshotResponse};
use crate::session::SessionEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init: SessionSnapshotResponse,
    events_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Stream starts with a full snapshot, then live events
    let init = futures::stream::once(async move { Ok(init_event(&init)) });

    let broadcasts = BroadcastStream::new(events_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &SessionSnapshotResponse) -> Event {
    let data = json!({
        "type": "init",
        "session": snapshot.session,
        "messages": snapshot.messages,
        "pending": snapshot.pending,
        "error": snapshot.error,
    });
    Event::default().event("init").data(data.to_string())
}

fn session_event_to_axum(event: SessionEvent) -> Event {
    let (event_type, data) = match event {
        SessionEvent::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": MessageView::from(&message)
            }),
        ),
        SessionEvent::StateChange { pending } => (
            "state_change",
            json!({
                "type": "state_change",
                "pending": pending
            }),
        ),
        SessionEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
