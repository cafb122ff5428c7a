//! Mockingbird - a simulated chat assistant
//!
//! A Rust backend implementing a conversation state machine wired to a
//! canned, rule-based responder, serving a browser chat widget.

mod api;
mod responder;
mod session;
mod state_machine;

use api::{create_router, AppState};
use responder::{LoggingResponder, ResponderConfig, SimulatedResponder};
use session::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mockingbird=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("MOCKINGBIRD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let responder_config = ResponderConfig::from_env();
    tracing::info!(
        delay_min_ms = %responder_config.delay_min.as_millis(),
        delay_max_ms = %responder_config.delay_max.as_millis(),
        "Responder configured"
    );

    // The simulated responder stands in for a real backend; swap the
    // inner responder to integrate one.
    let responder = Arc::new(LoggingResponder::new(Arc::new(SimulatedResponder::new(
        responder_config,
    ))));

    // Create application state
    let state = AppState::new(SessionManager::new(responder));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Mockingbird server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
