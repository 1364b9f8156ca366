//! REST and WebSocket front end over a shared [`OrbitClock`].
//!
//! [`OrbitClock`]: crate::sim::clock::OrbitClock

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cfg::ServerConfig;

pub mod error;
pub mod messages;
mod routes;
mod socket;
pub mod state;
pub mod ticker;

pub use state::AppState;

/// Builds the HTTP router for `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/bodies", get(routes::bodies))
        .route("/api/body/:name", get(routes::body))
        .route("/api/relationship/:body1/:body2", get(routes::relationship))
        .route("/api/simulation/pause", post(routes::toggle_pause))
        .route("/api/simulation/reset", post(routes::reset))
        .route("/api/simulation/state", get(routes::simulation_state))
        .route("/api/simulation/speed", post(routes::set_speed))
        .route("/ws", get(socket::upgrade))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until ctrl-c.
pub async fn run(cfg: &ServerConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cfg.host, cfg.port))?;

    let state = AppState::from_config(cfg);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    tracing::info!("API available at http://{addr}/api");
    tracing::info!("WebSocket available at ws://{addr}/ws");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
