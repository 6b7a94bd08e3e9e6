//! HTTP front controller — axum server and routing.
//!
//! Every path is the same entry point: the original hosting model routes all
//! requests through one controller, so `/` and the catch-all both run the
//! request pipeline in [`controller`]. The shared [`CancellationToken`] is
//! wired to axum's graceful shutdown.
//!
//! ## URL layout
//!
//! ```text
//! GET  /               → diagnostic report
//! GET  /favicon.ico    → 204
//! GET  /{*path}        → diagnostic report (front-controller catch-all)
//! ```

mod controller;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::report::EscalationPolicy;

// ── Shared request state ──────────────────────────────────────────────────────

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted. Immutable for the life
/// of the process: the manifest path is derived once at startup and the
/// escalation policy is an explicit value, not a process global.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub manifest_path: Arc<PathBuf>,
    pub policy: Arc<EscalationPolicy>,
}

impl ServerState {
    pub fn new(config: Config, manifest_path: PathBuf, policy: EscalationPolicy) -> Self {
        Self {
            config: Arc::new(config),
            manifest_path: Arc::new(manifest_path),
            policy: Arc::new(policy),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(controller::index))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/{*path}", get(controller::index))
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind and serve until the shutdown token fires.
pub async fn run(state: ServerState, shutdown: CancellationToken) -> Result<(), AppError> {
    let bind_addr = state.config.http.bind.clone();
    let router = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "front controller listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("front controller shut down");
    Ok(())
}
