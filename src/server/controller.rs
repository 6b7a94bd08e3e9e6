//! The per-request pipeline and its failure boundary.
//!
//! Sequence per request: check the vendor manifest exists → parse it →
//! collect the report under the escalation policy → render. Every failure
//! lands in one flat [`Failure`] taxonomy; each variant owns exactly one log
//! category and one user-facing body, so no variant can shadow another and
//! every arm is reachable.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::report::{self, render, EscalatedCondition};
use crate::vendor::{self, ManifestError};

use super::ServerState;

// ── Failure taxonomy ──────────────────────────────────────────────────────────

/// Request-scoped failure, classified at the boundary.
#[derive(Debug, Error)]
pub(super) enum Failure {
    /// The generated vendor manifest is absent — the install step was not run.
    #[error("{0}")]
    Config(ManifestError),

    /// A condition was escalated into a failure by the active policy.
    #[error("{0}")]
    Conversion(EscalatedCondition),

    /// Any other failure while loading the manifest or producing the report.
    #[error("{0}")]
    Unexpected(String),
}

impl Failure {
    fn category(&self) -> &'static str {
        match self {
            Failure::Config(_) => "ConfigurationError",
            Failure::Conversion(_) => "ConversionError",
            Failure::Unexpected(_) => "UnexpectedError",
        }
    }

    fn user_message(&self) -> &'static str {
        match self {
            Failure::Config(_) => "An error occurred. Please check the logs.",
            Failure::Conversion(_) => "A fatal error occurred. Please check the logs.",
            Failure::Unexpected(_) => "An unexpected error occurred. Please check the logs.",
        }
    }

    /// One line per failure: `<Category>: <message>`.
    fn log(&self) {
        error!("{}: {}", self.category(), self);
    }
}

impl From<ManifestError> for Failure {
    fn from(e: ManifestError) -> Self {
        match e {
            ManifestError::Missing(_) => Failure::Config(e),
            other => Failure::Unexpected(other.to_string()),
        }
    }
}

// ── Handler ───────────────────────────────────────────────────────────────────

/// GET / and GET /{*path} — the front controller.
pub(super) async fn index(State(state): State<ServerState>) -> Response {
    // The pipeline does blocking file I/O — run it off the async executor.
    // A panicking probe surfaces here as a join error, not a dead worker.
    let outcome = tokio::task::spawn_blocking(move || run_pipeline(&state)).await;
    let result = match outcome {
        Ok(result) => result,
        Err(e) => Err(Failure::Unexpected(format!("report generation panicked: {e}"))),
    };

    match result {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(failure) => {
            failure.log();
            (StatusCode::INTERNAL_SERVER_ERROR, failure.user_message()).into_response()
        }
    }
}

/// The request pipeline proper. Performs no writes; repeated invocations
/// under identical conditions produce identical outcomes.
fn run_pipeline(state: &ServerState) -> Result<String, Failure> {
    let manifest = vendor::load(&state.manifest_path)?;
    let report = report::collect(&state.config, &manifest, &state.policy)
        .map_err(Failure::Conversion)?;
    Ok(render::page(&report))
}
