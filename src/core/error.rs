//! Application-wide error types.
//!
//! [`AppError`] covers startup-time failures (config, logger, server bind).
//! Request-scoped failures are handled by the boundary in
//! [`crate::server::controller`] and never surface as `AppError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
