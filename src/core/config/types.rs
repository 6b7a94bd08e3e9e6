//! Public configuration structs consumed by the rest of the crate.
//!
//! Produced by the `load` module from the raw TOML shape.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub vendor: VendorConfig,
    pub report: ReportConfig,
}

/// `[service]` — process identity and logging.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
    /// Append-mode log file; stderr when unset.
    pub log_file: Option<PathBuf>,
}

/// `[http]` — listener settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub bind: String,
}

/// `[vendor]` — generated dependency manifest.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    /// Explicit manifest path. When unset the path is derived from the
    /// entry binary's location (two directory levels up, plus
    /// `vendor/manifest.toml`).
    pub manifest: Option<PathBuf>,
}

/// `[report]` — report collection behaviour.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Condition severities escalated into request failures.
    /// Validated and turned into an `EscalationPolicy` at startup.
    pub escalate: Vec<String>,
}
